//! Merge accumulator

use crate::report::{Collision, CollisionKind};
use api_doc_toolkit_common::{SpecDocument, COMPONENTS_KEY, PATHS_KEY, SCHEMAS_KEY};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// What one source document added
#[derive(Debug, Default)]
pub(crate) struct FoldOutcome {
    pub paths: usize,
    pub schemas: usize,
    pub collisions: Vec<Collision>,
}

/// Merged spec under construction
///
/// Paths and schemas are kept apart from the other top-level keys so the
/// base overlay can never replace them. `components` entries other than
/// `schemas` come only from the base overlay.
#[derive(Debug, Default)]
pub(crate) struct MergedSpec {
    paths: Mapping,
    schemas: Mapping,
    components: Mapping,
    top_level: Mapping,
    origins: HashMap<(CollisionKind, Value), PathBuf>,
}

impl MergedSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union a source document into the accumulator, first definition wins
    pub fn fold(&mut self, source: &SpecDocument, origin: &Path) -> FoldOutcome {
        let mut outcome = FoldOutcome::default();

        if let Some(paths) = source.paths() {
            outcome.paths = union_into(
                &mut self.paths,
                &mut self.origins,
                CollisionKind::Path,
                paths,
                origin,
                &mut outcome.collisions,
            );
        }

        if let Some(schemas) = source.schemas() {
            outcome.schemas = union_into(
                &mut self.schemas,
                &mut self.origins,
                CollisionKind::Schema,
                schemas,
                origin,
                &mut outcome.collisions,
            );
        }

        outcome
    }

    /// Overlay the base configuration's top-level keys
    ///
    /// `components` is overlaid one entry at a time. Returns the keys left
    /// alone because they hold merged content (`paths`, `components.schemas`).
    pub fn overlay(&mut self, base: SpecDocument) -> Vec<String> {
        let mut ignored = Vec::new();

        for (key, value) in base.into_mapping() {
            match key.as_str() {
                Some(PATHS_KEY) => ignored.push(PATHS_KEY.to_string()),
                Some(COMPONENTS_KEY) => match value {
                    Value::Mapping(components) => {
                        for (name, entry) in components {
                            if name.as_str() == Some(SCHEMAS_KEY) {
                                ignored.push(format!("{COMPONENTS_KEY}.{SCHEMAS_KEY}"));
                                continue;
                            }
                            self.components.insert(name, entry);
                        }
                    }
                    Value::Null => {}
                    _ => ignored.push(COMPONENTS_KEY.to_string()),
                },
                _ => {
                    self.top_level.insert(key, value);
                }
            }
        }

        ignored
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    pub fn into_document(self) -> SpecDocument {
        let mut components = Mapping::new();
        components.insert(Value::from(SCHEMAS_KEY), Value::Mapping(self.schemas));
        components.extend(self.components);

        let mut root = Mapping::new();
        root.insert(Value::from(PATHS_KEY), Value::Mapping(self.paths));
        root.insert(Value::from(COMPONENTS_KEY), Value::Mapping(components));
        root.extend(self.top_level);

        SpecDocument::from_mapping(root)
    }
}

fn union_into(
    target: &mut Mapping,
    origins: &mut HashMap<(CollisionKind, Value), PathBuf>,
    kind: CollisionKind,
    source: &Mapping,
    origin: &Path,
    collisions: &mut Vec<Collision>,
) -> usize {
    let mut added = 0;

    for (key, value) in source {
        if target.contains_key(key) {
            let kept_from = origins
                .get(&(kind, key.clone()))
                .cloned()
                .unwrap_or_default();
            collisions.push(Collision {
                kind,
                key: key_label(key),
                kept_from,
                dropped_from: origin.to_path_buf(),
            });
            continue;
        }

        target.insert(key.clone(), value.clone());
        origins.insert((kind, key.clone()), origin.to_path_buf());
        added += 1;
    }

    added
}

/// Printable form of a mapping key
fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}
