//! Condition map resolution.
//!
//! Before the validating walk starts, the whole instance is scanned breadth
//! first and the current value of every discriminator field (a field with an
//! `enum`/`enums` rule) is recorded under its dotted path. `when` rules then
//! consult the map, so a condition may reference any field of the instance,
//! not only ancestors of the field it guards.

use std::collections::{HashMap, VecDeque};

use crate::path::FieldPath;
use crate::schema::{unwrap_present, Inspect, Kind};

/// Snapshot of discriminator values keyed by dotted path.
///
/// Absent and empty values are not recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionMap {
    values: HashMap<String, String>,
}

impl ConditionMap {
    /// Scans `root` and records every discriminator value.
    ///
    /// Sequences and maps are not traversed: their elements have no
    /// addressable path.
    pub fn resolve(root: &dyn Inspect) -> Self {
        let mut map = Self::default();
        let mut queue: VecDeque<(&dyn Inspect, FieldPath)> = VecDeque::new();
        queue.push_back((root, FieldPath::root()));

        while let Some((value, path)) = queue.pop_front() {
            let Some(value) = unwrap_present(value) else {
                continue;
            };
            let Kind::Model(model) = value.kind() else {
                continue;
            };
            // A type whose rules fail to compile is reported by the walk.
            let Ok(schema) = model.schema() else {
                continue;
            };

            for (rules, field) in schema.fields().zip(model.field_values()) {
                let field_path = path.push_field(&rules.name);
                if rules.is_discriminator() {
                    if let Some(snapshot) = snapshot(field) {
                        map.insert(field_path.to_string(), snapshot);
                    }
                }
                queue.push_back((field, field_path));
            }
        }

        tracing::trace!(conditions = ?map.values, "resolved condition map");
        map
    }

    /// Returns the recorded value at a dotted path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    /// Records `value` at `path`, replacing any previous value.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.values.insert(path.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Returns the scalar text of a discriminator value, if it has one.
fn snapshot(value: &dyn Inspect) -> Option<String> {
    match unwrap_present(value)?.kind() {
        Kind::Text(text) if !text.is_empty() => Some(text.to_string()),
        Kind::Number(number) => Some(number.to_string()),
        Kind::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
