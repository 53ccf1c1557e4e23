//! Reference shapes for the unknown-field check.
//!
//! A [`Shape`] records which keys a document may carry at each level. It is
//! normally derived from a populated instance with [`Shape::of`], so it
//! reflects the declared fields of every model reached, and open values
//! ([`Object`](crate::Object), `serde_json::Value`) stay unconstrained.

use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::{Inspect, Kind};

/// The expected structure of a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Shape {
    /// A leaf value. Only container kinds are compared against it.
    #[default]
    Scalar,
    /// Anything goes below this point.
    Open,
    /// The keys an object may carry, in declaration order.
    Object(IndexMap<String, Shape>),
    /// A sequence with at most one exemplar shape, applied to every element.
    /// No exemplar means element contents are not checked.
    List(Vec<Shape>),
}

impl Shape {
    /// Derives the shape of a populated value.
    ///
    /// Models become objects keyed by wire name. Sequences get one exemplar
    /// merged from all of their elements, or none when empty. Maps become
    /// objects keyed by their current keys.
    pub fn of(value: &dyn Inspect) -> Shape {
        match value.kind() {
            Kind::Optional(Some(inner)) => Shape::of(inner),
            Kind::Optional(None) => Shape::Scalar,
            Kind::Text(_) | Kind::Number(_) | Kind::Bool(_) | Kind::Time(_) => Shape::Scalar,
            Kind::Open { .. } => Shape::Open,
            Kind::Model(model) => {
                let Ok(schema) = model.schema() else {
                    // broken rules are reported by the walk
                    return Shape::Open;
                };
                let fields = schema
                    .fields()
                    .zip(model.field_values())
                    .map(|(rules, value)| (rules.name.clone(), Shape::of(value)))
                    .collect();
                Shape::Object(fields)
            }
            Kind::List(items) => Shape::list(items.into_iter().map(Shape::of)),
            Kind::Map(entries) => Shape::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), Shape::of(value)))
                    .collect(),
            ),
        }
    }

    /// Derives a shape from a sample JSON document.
    pub fn from_json(value: &Value) -> Shape {
        match value {
            Value::Object(map) => Shape::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Shape::from_json(value)))
                    .collect(),
            ),
            Value::Array(items) => Shape::list(items.iter().map(Shape::from_json)),
            _ => Shape::Scalar,
        }
    }

    fn list(elements: impl Iterator<Item = Shape>) -> Shape {
        let exemplar = elements.reduce(Shape::merge);
        Shape::List(exemplar.into_iter().collect())
    }

    /// Combines two shapes into one that admits the keys of both.
    pub fn merge(self, other: Shape) -> Shape {
        match (self, other) {
            (Shape::Open, _) | (_, Shape::Open) => Shape::Open,
            (Shape::Scalar, other) => other,
            (this, Shape::Scalar) => this,
            (Shape::Object(mut left), Shape::Object(right)) => {
                for (key, shape) in right {
                    match left.get_mut(&key) {
                        Some(existing) => *existing = std::mem::take(existing).merge(shape),
                        None => {
                            left.insert(key, shape);
                        }
                    }
                }
                Shape::Object(left)
            }
            (Shape::List(left), Shape::List(right)) => {
                Shape::list(left.into_iter().chain(right))
            }
            // an object in one element and an array in another
            (Shape::Object(_), Shape::List(_)) | (Shape::List(_), Shape::Object(_)) => Shape::Open,
        }
    }

    /// Returns the exemplar applied to list elements.
    pub fn exemplar(&self) -> Option<&Shape> {
        match self {
            Shape::List(exemplars) => exemplars.first(),
            _ => None,
        }
    }

    /// Returns the shape declared for `key` in an object shape.
    pub fn field(&self, key: &str) -> Option<&Shape> {
        match self {
            Shape::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// A short name for the container kind, used in mismatch messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Scalar => "scalar",
            Shape::Open => "any",
            Shape::Object(_) => "object",
            Shape::List(_) => "array",
        }
    }
}
