//! The open object type.

use std::any::Any;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::traits::{Inspect, Kind};

/// A free-form JSON object field.
///
/// Contents of an `Object` are never checked for unknown fields: its shape is
/// [`Shape::Open`](crate::Shape::Open). Use it for metadata bags and other
/// fully dynamic sub-objects.
///
/// # Example
///
/// ```rust
/// use strictbind::Object;
///
/// let meta: Object = serde_json::from_str(r#"{"anything": [1, 2, 3]}"#).unwrap();
/// assert!(meta.contains_key("anything"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Object(pub Map<String, Value>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for Object {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Object {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Map<String, Value>> for Object {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Inspect for Object {
    fn kind(&self) -> Kind<'_> {
        Kind::Open {
            is_empty: self.0.is_empty(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
