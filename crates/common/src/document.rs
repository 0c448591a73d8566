//! Structured spec documents
//!
//! A `SpecDocument` is the parsed form of one spec file: a mapping from keys
//! to arbitrary nested values. Only `paths` and `components.schemas` carry
//! meaning for merging; every other value is treated as opaque.

use crate::{DocumentError, SpecFormat};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Number, Value};
use std::fs;
use std::path::Path;

pub const PATHS_KEY: &str = "paths";
pub const COMPONENTS_KEY: &str = "components";
pub const SCHEMAS_KEY: &str = "schemas";

/// Parsed spec document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDocument {
    root: Mapping,
}

impl SpecDocument {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Parse document text in the given format
    ///
    /// `origin` only labels errors. An empty document parses to an empty
    /// mapping; any other non-mapping top level is rejected.
    pub fn parse(content: &str, format: SpecFormat, origin: &Path) -> Result<Self, DocumentError> {
        let value: Value = match format {
            SpecFormat::Yaml => serde_yaml::from_str(content).map_err(|e| DocumentError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?,
            SpecFormat::Json => serde_json::from_str(content).map_err(|e| DocumentError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?,
        };

        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            other => Err(DocumentError::NotAMapping {
                path: origin.to_path_buf(),
                found: value_kind(&other),
            }),
        }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn into_mapping(self) -> Mapping {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The `paths` mapping, if present and a mapping
    pub fn paths(&self) -> Option<&Mapping> {
        self.root.get(PATHS_KEY).and_then(Value::as_mapping)
    }

    /// The `components.schemas` mapping, if present and a mapping
    pub fn schemas(&self) -> Option<&Mapping> {
        self.root
            .get(COMPONENTS_KEY)
            .and_then(Value::as_mapping)
            .and_then(|components| components.get(SCHEMAS_KEY))
            .and_then(Value::as_mapping)
    }

    /// Convert to plain JSON values
    ///
    /// YAML tags turn into single-key mappings and scalar mapping keys into
    /// strings (`~` becomes `"null"`, `true` becomes `"true"`). Sequence and
    /// mapping keys are rejected. Object keys come out sorted.
    pub fn normalize(&self) -> Result<serde_json::Value, DocumentError> {
        let root = Value::Mapping(stringify_keys(&self.root));
        serde_json::to_value(&root).map_err(DocumentError::Normalize)
    }

    /// Render the normalized document as text
    pub fn render(&self, format: SpecFormat) -> Result<String, DocumentError> {
        let normalized = self.normalize()?;
        match format {
            SpecFormat::Yaml => serde_yaml::to_string(&normalized)
                .map_err(|e| DocumentError::Serialize(e.to_string())),
            SpecFormat::Json => serde_json::to_string_pretty(&normalized)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| DocumentError::Serialize(e.to_string())),
        }
    }

    /// Render and write to `path`, replacing any existing content
    pub fn write_to(&self, path: &Path, format: SpecFormat) -> Result<(), DocumentError> {
        let rendered = self.render(format)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DocumentError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, rendered).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn stringify_keys(mapping: &Mapping) -> Mapping {
    mapping
        .iter()
        .map(|(key, value)| (json_key(key), stringify_nested(value)))
        .collect()
}

fn stringify_nested(value: &Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(stringify_keys(mapping)),
        Value::Sequence(items) => Value::Sequence(items.iter().map(stringify_nested).collect()),
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: stringify_nested(&tagged.value),
        })),
        other => other.clone(),
    }
}

/// Object key spelling of a scalar key
fn json_key(key: &Value) -> Value {
    match key {
        Value::Null => Value::from("null"),
        Value::Bool(b) => Value::from(b.to_string()),
        Value::Number(n) => Value::from(number_key(n)),
        other => other.clone(),
    }
}

fn number_key(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_nan() => "NaN".to_string(),
        Some(f) if n.is_f64() && f.is_infinite() => {
            let spelled = if f > 0.0 { "Infinity" } else { "-Infinity" };
            spelled.to_string()
        }
        _ => n.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
