//! Spec merging for the API Doc Toolkit
//!
//! Folds the `paths` and `components.schemas` of every spec file in a
//! directory into one document and writes it to an output path.
//!
//! ## Merge Strategy
//!
//! - Source files are processed in file-name order
//! - The first definition of a path or schema wins; later ones are reported
//!   as collisions and dropped (or abort the merge with `ConflictPolicy::Fail`)
//! - The base configuration (`static_page.yaml`) and readiness probe
//!   (`ready_probe.yaml`) never contribute paths or schemas
//! - The base configuration's other top-level keys (`openapi`, `info`,
//!   `servers`, ...) are overlaid onto the result
//! - The result is normalized to plain values and always fully rewritten
//!
//! ## Usage
//! ```rust,no_run
//! use api_doc_toolkit_merger::{MergeOptions, SourceFormats, SpecMerger};
//!
//! let report = SpecMerger::new("./specs", "./config/merged_spec.yaml")?
//!     .with_options(MergeOptions::default().with_sources(SourceFormats::All))
//!     .merge()?;
//! println!("{} paths merged", report.total_paths);
//! # Ok::<(), api_doc_toolkit_merger::MergeError>(())
//! ```

mod accumulator;
mod options;
mod report;

pub use options::{
    ConflictPolicy, MergeOptions, SourceFormats, BASE_CONFIG_FILE, READY_PROBE_FILE,
};
pub use report::{
    Collision, CollisionKind, MergeReport, MergeReporter, MergedFile, SkipReason, SkippedFile,
    TracingReporter,
};

use accumulator::MergedSpec;
use api_doc_toolkit_common::{
    DocumentError, SpecDocument, SpecExtension, SpecFile, SpecFileError, SpecFormat,
};
use api_doc_toolkit_locator::SpecLocator;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while merging
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Locate(#[from] SpecFileError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Failed to remove stale output {path}: {source}")]
    RemoveOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Conflicting definitions: {0}")]
    Conflict(Collision),
}

pub type Result<T> = std::result::Result<T, MergeError>;

/// Merges the spec files of one directory into a single document
pub struct SpecMerger {
    locator: SpecLocator,
    output: PathBuf,
    options: MergeOptions,
    reporter: Box<dyn MergeReporter>,
}

impl SpecMerger {
    /// Create a merger reading from `source_dir` and writing to `output`
    ///
    /// The source directory is validated immediately.
    pub fn new(source_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            locator: SpecLocator::new(source_dir)?,
            output: output.into(),
            options: MergeOptions::default(),
            reporter: Box::new(TracingReporter),
        })
    }

    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the default `TracingReporter`
    pub fn with_reporter(mut self, reporter: Box<dyn MergeReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn source_dir(&self) -> &Path {
        self.locator.directory()
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Rebuild the merged spec from scratch
    pub fn merge(&self) -> Result<MergeReport> {
        info!(
            source = %self.source_dir().display(),
            output = %self.output.display(),
            "Merging spec files"
        );

        self.remove_stale_output()?;

        let mut merged = MergedSpec::new();
        let mut report = MergeReport::new(self.output.clone());

        for file in self.locator.spec_files()? {
            if let Some(reason) = self.skip_reason(&file) {
                let skipped = SkippedFile {
                    path: file.path().to_path_buf(),
                    reason,
                };
                self.reporter.file_skipped(&skipped);
                report.skipped.push(skipped);
                continue;
            }

            let document = load_document(file.path(), file.format())?;
            let outcome = merged.fold(&document, file.path());

            for collision in outcome.collisions {
                self.reporter.collision(&collision);
                if self.options.conflict_policy == ConflictPolicy::Fail {
                    return Err(MergeError::Conflict(collision));
                }
                report.collisions.push(collision);
            }

            let merged_file = MergedFile {
                path: file.path().to_path_buf(),
                paths: outcome.paths,
                schemas: outcome.schemas,
            };
            self.reporter.file_merged(&merged_file);
            report.merged.push(merged_file);
        }

        self.apply_base_config(&mut merged, &mut report)?;

        report.total_paths = merged.path_count();
        report.total_schemas = merged.schema_count();

        merged
            .into_document()
            .write_to(&self.output, SpecFormat::for_output(&self.output))?;

        info!(
            output = %self.output.display(),
            paths = report.total_paths,
            schemas = report.total_schemas,
            collisions = report.collisions.len(),
            "Wrote merged spec"
        );
        Ok(report)
    }

    fn skip_reason(&self, file: &SpecFile) -> Option<SkipReason> {
        if self.options.is_excluded(&file.file_name()) {
            Some(SkipReason::Excluded)
        } else if !self.options.sources.includes(file.format()) {
            Some(SkipReason::FormatNotMerged)
        } else {
            None
        }
    }

    fn remove_stale_output(&self) -> Result<()> {
        match fs::remove_file(&self.output) {
            Ok(()) => {
                debug!(output = %self.output.display(), "Removed stale output");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MergeError::RemoveOutput {
                path: self.output.clone(),
                source,
            }),
        }
    }

    fn apply_base_config(&self, merged: &mut MergedSpec, report: &mut MergeReport) -> Result<()> {
        let base_path = self.source_dir().join(&self.options.base_config_file);

        if !base_path.is_file() {
            self.reporter.base_config_missing(&base_path);
            return Ok(());
        }

        let format = SpecExtension::from_path(&base_path)
            .map(|ext| ext.format())
            .unwrap_or(SpecFormat::Yaml);
        let base = load_document(&base_path, format)?;
        let ignored = merged.overlay(base);

        self.reporter.base_config_applied(&base_path, &ignored);
        report.base_config = Some(base_path);
        report.ignored_base_keys = ignored;
        Ok(())
    }
}

/// Read and parse one spec file
fn load_document(path: &Path, format: SpecFormat) -> Result<SpecDocument> {
    let content = SpecLocator::read_contents(path)?;
    Ok(SpecDocument::parse(&content, format, path)?)
}
