//! Merge outcome reporting

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Section a colliding key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    Path,
    Schema,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionKind::Path => write!(f, "path"),
            CollisionKind::Schema => write!(f, "schema"),
        }
    }
}

/// A key defined by more than one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub kind: CollisionKind,
    pub key: String,
    /// File whose definition was kept
    pub kept_from: PathBuf,
    /// File whose definition was dropped
    pub dropped_from: PathBuf,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} defined in {} is already provided by {}",
            self.kind,
            self.key,
            self.dropped_from.display(),
            self.kept_from.display()
        )
    }
}

/// Why a spec file was left out of the fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Base configuration or readiness probe
    Excluded,
    /// Recognized extension whose format is not merged
    FormatNotMerged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedFile {
    pub path: PathBuf,
    /// Paths contributed by this file
    pub paths: usize,
    /// Schemas contributed by this file
    pub schemas: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Summary of one merge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub output: PathBuf,
    pub merged: Vec<MergedFile>,
    pub skipped: Vec<SkippedFile>,
    pub collisions: Vec<Collision>,
    /// Base configuration overlaid onto the result, if found
    pub base_config: Option<PathBuf>,
    /// Top-level keys of the base configuration that were not overlaid
    pub ignored_base_keys: Vec<String>,
    pub total_paths: usize,
    pub total_schemas: usize,
}

impl MergeReport {
    pub(crate) fn new(output: PathBuf) -> Self {
        Self {
            output,
            merged: Vec::new(),
            skipped: Vec::new(),
            collisions: Vec::new(),
            base_config: None,
            ignored_base_keys: Vec::new(),
            total_paths: 0,
            total_schemas: 0,
        }
    }

    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Receives merge progress as it happens
#[cfg_attr(test, mockall::automock)]
pub trait MergeReporter {
    fn file_merged(&self, file: &MergedFile);

    fn file_skipped(&self, file: &SkippedFile);

    fn collision(&self, collision: &Collision);

    fn base_config_applied(&self, path: &Path, ignored_keys: &[String]);

    fn base_config_missing(&self, expected: &Path);
}

/// Reports through `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl MergeReporter for TracingReporter {
    fn file_merged(&self, file: &MergedFile) {
        info!(
            file = %file.path.display(),
            paths = file.paths,
            schemas = file.schemas,
            "Merged spec file"
        );
    }

    fn file_skipped(&self, file: &SkippedFile) {
        match file.reason {
            SkipReason::Excluded => {
                debug!(file = %file.path.display(), "Skipping excluded spec file")
            }
            SkipReason::FormatNotMerged => info!(
                file = %file.path.display(),
                "Skipping spec file whose format is not merged"
            ),
        }
    }

    fn collision(&self, collision: &Collision) {
        warn!(
            kind = %collision.kind,
            key = %collision.key,
            kept = %collision.kept_from.display(),
            dropped = %collision.dropped_from.display(),
            "Duplicate definition dropped"
        );
    }

    fn base_config_applied(&self, path: &Path, ignored_keys: &[String]) {
        info!(file = %path.display(), "Applied base configuration");
        if !ignored_keys.is_empty() {
            warn!(
                file = %path.display(),
                keys = ?ignored_keys,
                "Base configuration keys reserved for merged content were ignored"
            );
        }
    }

    fn base_config_missing(&self, expected: &Path) {
        info!(file = %expected.display(), "Base configuration file does not exist");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_display() {
        let collision = Collision {
            kind: CollisionKind::Path,
            key: "/users".to_string(),
            kept_from: PathBuf::from("a.yaml"),
            dropped_from: PathBuf::from("b.yaml"),
        };
        assert_eq!(
            collision.to_string(),
            "path \"/users\" defined in b.yaml is already provided by a.yaml"
        );
    }
}
