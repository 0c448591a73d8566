//! Environment-driven settings
//!
//! Read once at process start. Every value has a default relative to the
//! installation root and can be overridden through an environment variable.

use std::env;
use std::path::{Path, PathBuf};

pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const CONFIG_DIR_VAR: &str = "CONFIG_DIR";
pub const SPEC_DIR_VAR: &str = "SPEC_DIR";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name of the merged spec inside the config directory
pub const DEFAULT_OUTPUT_FILE: &str = "merged_spec.yaml";

/// Resolved process settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Log verbosity (trace, debug, info, warn, error)
    pub log_level: String,
    /// Configuration directory
    pub config_dir: PathBuf,
    /// Directory scanned for spec files
    pub spec_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn from_env() -> Self {
        Self::resolve(&install_root(), |key| env::var(key).ok())
    }

    /// Resolve settings against `root` using `lookup` for overrides
    ///
    /// Empty values count as unset.
    pub fn resolve<F>(root: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            log_level: lookup(LOG_LEVEL_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            config_dir: lookup(CONFIG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join("config")),
            spec_dir: lookup(SPEC_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join("specs")),
        }
    }

    /// Default location of the merged spec
    pub fn default_output(&self) -> PathBuf {
        self.config_dir.join(DEFAULT_OUTPUT_FILE)
    }
}

/// Directory containing the running executable, or `.` if unknown
fn install_root() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
