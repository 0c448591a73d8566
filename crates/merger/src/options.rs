//! Merge options

use api_doc_toolkit_common::SpecFormat;
use serde::Serialize;

/// Base configuration file overlaid onto the merged result
pub const BASE_CONFIG_FILE: &str = "static_page.yaml";

/// Readiness probe spec, served separately and never merged
pub const READY_PROBE_FILE: &str = "ready_probe.yaml";

/// Which source formats take part in the fold step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormats {
    /// `.yaml` and `.yml` only
    #[default]
    YamlOnly,
    /// Every recognized extension, JSON included
    All,
}

impl SourceFormats {
    pub fn includes(&self, format: SpecFormat) -> bool {
        match self {
            SourceFormats::YamlOnly => format == SpecFormat::Yaml,
            SourceFormats::All => true,
        }
    }
}

/// What to do when two files define the same path or schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep the first definition, report the rest
    #[default]
    FirstWins,
    /// Abort on the first duplicate
    Fail,
}

/// Merge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOptions {
    /// File name of the base configuration inside the source directory
    pub base_config_file: String,
    /// Extra file names never folded into paths and schemas
    pub excluded_files: Vec<String>,
    pub sources: SourceFormats,
    pub conflict_policy: ConflictPolicy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            base_config_file: BASE_CONFIG_FILE.to_string(),
            excluded_files: Vec::new(),
            sources: SourceFormats::default(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl MergeOptions {
    pub fn with_sources(mut self, sources: SourceFormats) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_base_config_file(mut self, file_name: impl Into<String>) -> Self {
        self.base_config_file = file_name.into();
        self
    }

    pub fn with_excluded_files<I, S>(mut self, file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_files
            .extend(file_names.into_iter().map(Into::into));
        self
    }

    /// Exact file-name match
    ///
    /// The base configuration and the readiness probe are always excluded,
    /// on top of `excluded_files`.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        file_name == self.base_config_file
            || file_name == READY_PROBE_FILE
            || self.excluded_files.iter().any(|f| f == file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let options = MergeOptions::default();
        assert!(options.is_excluded("static_page.yaml"));
        assert!(options.is_excluded("ready_probe.yaml"));
        assert!(!options.is_excluded("Static_Page.yaml"));
        assert!(!options.is_excluded("users.yaml"));
    }

    #[test]
    fn test_base_config_always_excluded() {
        let options = MergeOptions::default()
            .with_base_config_file("base.yaml")
            .with_excluded_files(["health.yaml"]);
        assert!(options.is_excluded("base.yaml"));
        assert!(options.is_excluded("health.yaml"));
        assert!(!options.is_excluded("static_page.yaml"));
    }

    #[test]
    fn test_custom_exclusions_keep_ready_probe() {
        let options = MergeOptions::default()
            .with_excluded_files(["health.yaml"])
            .with_excluded_files(["metrics.yaml"]);
        assert!(options.is_excluded("ready_probe.yaml"));
        assert!(options.is_excluded("static_page.yaml"));
        assert!(options.is_excluded("health.yaml"));
        assert!(options.is_excluded("metrics.yaml"));
        assert!(!options.is_excluded("users.yaml"));
    }

    #[test]
    fn test_source_formats() {
        assert!(SourceFormats::YamlOnly.includes(SpecFormat::Yaml));
        assert!(!SourceFormats::YamlOnly.includes(SpecFormat::Json));
        assert!(SourceFormats::All.includes(SpecFormat::Json));
    }
}
