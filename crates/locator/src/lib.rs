//! Spec file discovery for the API Doc Toolkit
//!
//! Scans one directory level for API specification files recognized by
//! extension (`.json`, `.yaml`, `.yml`, case-insensitive).
//!
//! # Examples
//!
//! ```no_run
//! use api_doc_toolkit_locator::SpecLocator;
//!
//! let locator = SpecLocator::new("./specs").expect("invalid spec directory");
//! for file in locator.spec_files().expect("no spec files") {
//!     println!("{}", file.path().display());
//! }
//! ```

use api_doc_toolkit_common::{
    DirectoryProblem, Result, SpecExtension, SpecFile, SpecFileError,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Locates spec files inside a single directory
///
/// The directory is validated when the locator is built. Listing is never
/// cached: every call reads the directory again.
#[derive(Debug, Clone)]
pub struct SpecLocator {
    directory: PathBuf,
}

impl SpecLocator {
    /// Create a locator for `directory`
    ///
    /// Fails with `InvalidDirectory` when the path does not exist, is not a
    /// directory, or cannot be read.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        info!(directory = %directory.display(), "Initializing spec locator");

        validate_directory(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List spec files, sorted by file name
    ///
    /// Only regular files one level deep are considered; symlinks are
    /// followed. Fails with `NoSpecFilesFound` when nothing matches.
    pub fn spec_files(&self) -> Result<Vec<SpecFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.directory.clone());
                SpecFileError::Io {
                    path,
                    source: e.into(),
                }
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match SpecFile::from_path(path) {
                Some(file) => files.push(file),
                None => debug!(file = %path.display(), "Ignoring file with unrecognized extension"),
            }
        }

        if files.is_empty() {
            return Err(SpecFileError::NoSpecFilesFound {
                directory: self.directory.clone(),
            });
        }

        debug!(
            directory = %self.directory.display(),
            count = files.len(),
            "Found spec files"
        );
        Ok(files)
    }

    /// Read a spec file as UTF-8 text
    ///
    /// Rejects unrecognized extensions with `UnsupportedFileType` even when
    /// the path did not come from a listing.
    pub fn read_contents(path: &Path) -> Result<String> {
        if SpecExtension::from_path(path).is_none() {
            return Err(SpecFileError::UnsupportedFileType {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_default(),
            });
        }

        fs::read_to_string(path).map_err(|source| SpecFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Partition the listing by extension
    ///
    /// Every recognized extension is present, possibly with no files.
    pub fn group_by_extension(&self) -> Result<BTreeMap<SpecExtension, Vec<SpecFile>>> {
        let mut grouped: BTreeMap<SpecExtension, Vec<SpecFile>> = SpecExtension::ALL
            .into_iter()
            .map(|ext| (ext, Vec::new()))
            .collect();

        for file in self.spec_files()? {
            grouped.entry(file.extension()).or_default().push(file);
        }

        Ok(grouped)
    }

    /// Whether the directory holds more than one spec file
    ///
    /// An empty listing counts as `false`; other failures propagate.
    pub fn has_multiple_spec_files(&self) -> Result<bool> {
        match self.spec_files() {
            Ok(files) => Ok(files.len() > 1),
            Err(SpecFileError::NoSpecFilesFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Regular file with a recognized extension
    pub fn is_valid_spec_file(path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        path.is_file() && SpecExtension::from_path(path).is_some()
    }
}

fn validate_directory(path: &Path) -> Result<()> {
    let invalid = |problem| SpecFileError::InvalidDirectory {
        path: path.to_path_buf(),
        problem,
    };

    if !path.exists() {
        return Err(invalid(DirectoryProblem::NotFound));
    }
    if !path.is_dir() {
        return Err(invalid(DirectoryProblem::NotADirectory));
    }
    if fs::read_dir(path).is_err() {
        return Err(invalid(DirectoryProblem::NotReadable));
    }

    Ok(())
}
