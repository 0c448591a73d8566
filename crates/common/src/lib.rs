//! Common types and utilities for the API Doc Toolkit
//!
//! This crate contains the error taxonomy, the spec file extension model,
//! the structured `SpecDocument`, and environment-driven `Settings` shared by
//! the locator, merger, and CLI components.

mod document;
mod extension;
mod settings;

pub use document::{SpecDocument, COMPONENTS_KEY, PATHS_KEY, SCHEMAS_KEY};
pub use extension::{supported_extensions, SpecExtension, SpecFile, SpecFormat};
pub use settings::{
    Settings, CONFIG_DIR_VAR, DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT_FILE, LOG_LEVEL_VAR,
    SPEC_DIR_VAR,
};

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a directory was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryProblem {
    NotFound,
    NotADirectory,
    NotReadable,
}

impl fmt::Display for DirectoryProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryProblem::NotFound => write!(f, "directory does not exist"),
            DirectoryProblem::NotADirectory => write!(f, "path is not a directory"),
            DirectoryProblem::NotReadable => write!(f, "directory not readable"),
        }
    }
}

/// Errors raised while locating and reading spec files
///
/// Callers can match the whole enum to handle every file utility failure,
/// or a single variant to react to one kind.
#[derive(Error, Debug)]
pub enum SpecFileError {
    #[error("Invalid directory {path}: {problem}")]
    InvalidDirectory {
        path: PathBuf,
        problem: DirectoryProblem,
    },

    #[error(
        "No API spec files found in {directory}. Supported extensions: {}",
        supported_extensions()
    )]
    NoSpecFilesFound { directory: PathBuf },

    #[error(
        "Unsupported file type: {extension:?} ({path}). Supported types: {}",
        supported_extensions()
    )]
    UnsupportedFileType { path: PathBuf, extension: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while parsing, normalizing, or writing a spec document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Expected a mapping at the top level of {path}, found {found}")]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("Failed to normalize merged document: {0}")]
    Normalize(#[source] serde_json::Error),

    #[error("Failed to serialize document: {0}")]
    Serialize(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for locator operations
pub type Result<T> = std::result::Result<T, SpecFileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directory_message() {
        let err = SpecFileError::InvalidDirectory {
            path: PathBuf::from("/missing"),
            problem: DirectoryProblem::NotFound,
        };
        assert_eq!(
            err.to_string(),
            "Invalid directory /missing: directory does not exist"
        );
    }

    #[test]
    fn test_no_spec_files_lists_extensions() {
        let err = SpecFileError::NoSpecFilesFound {
            directory: PathBuf::from("specs"),
        };
        let message = err.to_string();
        assert!(message.contains("specs"));
        assert!(message.contains(".json, .yaml, .yml"));
    }
}
