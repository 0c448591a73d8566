//! Spec file extensions and formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Recognized spec file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecExtension {
    Json,
    Yaml,
    Yml,
}

/// Structured document format behind an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecExtension {
    /// Every recognized extension, in display order
    pub const ALL: [SpecExtension; 3] = [SpecExtension::Json, SpecExtension::Yaml, SpecExtension::Yml];

    /// Match a path's extension, ignoring ASCII case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|candidate| ext.eq_ignore_ascii_case(&candidate.as_str()[1..]))
    }

    /// Extension with its leading dot (e.g. ".yaml")
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecExtension::Json => ".json",
            SpecExtension::Yaml => ".yaml",
            SpecExtension::Yml => ".yml",
        }
    }

    pub fn format(&self) -> SpecFormat {
        match self {
            SpecExtension::Json => SpecFormat::Json,
            SpecExtension::Yaml | SpecExtension::Yml => SpecFormat::Yaml,
        }
    }
}

impl fmt::Display for SpecExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SpecFormat {
    /// Format used when writing to `path`: JSON for `.json`, YAML otherwise
    pub fn for_output(path: &Path) -> Self {
        match SpecExtension::from_path(path) {
            Some(SpecExtension::Json) => SpecFormat::Json,
            _ => SpecFormat::Yaml,
        }
    }
}

impl fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecFormat::Json => write!(f, "JSON"),
            SpecFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Comma-separated list of recognized extensions for messages
pub fn supported_extensions() -> String {
    SpecExtension::ALL
        .iter()
        .map(SpecExtension::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A discovered spec file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecFile {
    path: PathBuf,
    extension: SpecExtension,
}

impl SpecFile {
    /// Wrap `path` if its extension is recognized
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let extension = SpecExtension::from_path(&path)?;
        Some(Self { path, extension })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> SpecExtension {
        self.extension
    }

    pub fn format(&self) -> SpecFormat {
        self.extension.format()
    }

    /// File name as UTF-8, lossy
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(
            SpecExtension::from_path(Path::new("api.YAML")),
            Some(SpecExtension::Yaml)
        );
        assert_eq!(
            SpecExtension::from_path(Path::new("api.Yml")),
            Some(SpecExtension::Yml)
        );
        assert_eq!(
            SpecExtension::from_path(Path::new("api.JSON")),
            Some(SpecExtension::Json)
        );
    }

    #[test]
    fn test_unrecognized_extensions() {
        assert_eq!(SpecExtension::from_path(Path::new("notes.txt")), None);
        assert_eq!(SpecExtension::from_path(Path::new("Makefile")), None);
        assert_eq!(SpecExtension::from_path(Path::new("api.yaml.bak")), None);
        assert_eq!(SpecExtension::from_path(Path::new(".yaml")), None);
    }

    #[test]
    fn test_formats() {
        assert_eq!(SpecExtension::Yml.format(), SpecFormat::Yaml);
        assert_eq!(SpecExtension::Json.format(), SpecFormat::Json);
        assert_eq!(SpecFormat::for_output(Path::new("out.json")), SpecFormat::Json);
        assert_eq!(SpecFormat::for_output(Path::new("out.yaml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::for_output(Path::new("out")), SpecFormat::Yaml);
    }

    #[test]
    fn test_spec_file_from_path() {
        let file = SpecFile::from_path("specs/users.yml").unwrap();
        assert_eq!(file.extension(), SpecExtension::Yml);
        assert_eq!(file.file_name(), "users.yml");
        assert!(SpecFile::from_path("specs/readme.md").is_none());
    }
}
