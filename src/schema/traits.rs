//! Traits for inspecting typed values.
//!
//! Validation walks a typed instance through the [`Inspect`] trait, which
//! exposes a categorized view of a value ([`Kind`]). Structs that carry field
//! rules implement [`Model`] as well, normally through the
//! [`model!`](crate::model) macro.

use std::any::Any;
use std::fmt::{self, Display};

use chrono::{DateTime, Utc};

use crate::error::AnnotationError;
use crate::hooks::{DynamicField, SelfCheck};

use super::model::ModelSchema;

/// A numeric value, kept in its source representation.
///
/// All comparisons normalize to `f64`, so integers beyond 2^53 lose
/// precision when checked against bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::UInt(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::UInt(n) => n == 0,
            Number::Float(n) => n == 0.0,
        }
    }

    /// Returns true for floating point values.
    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::UInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

/// The category of a value, as seen by the walker.
pub enum Kind<'a> {
    /// An optional (or otherwise nullable) value.
    Optional(Option<&'a dyn Inspect>),
    Text(&'a str),
    Number(Number),
    Bool(bool),
    /// A point in time; the zero instant counts as unset.
    Time(DateTime<Utc>),
    /// A sequence. Elements share the sequence's path.
    List(Vec<&'a dyn Inspect>),
    /// A string-keyed map. Values are located at `path.key`.
    Map(Vec<(&'a str, &'a dyn Inspect)>),
    /// A struct with declared fields and rules.
    Model(&'a dyn Model),
    /// A fully dynamic value that bypasses unknown-field rejection.
    Open { is_empty: bool },
}

/// A value the validator can walk.
///
/// Implemented for strings, numbers, booleans, timestamps, `Option`, `Box`,
/// `Vec`, string-keyed maps and the open types
/// ([`Object`](crate::Object), `serde_json::Value`). Structs implement it
/// through [`model!`](crate::model).
pub trait Inspect: Any {
    /// Returns the categorized view of this value.
    fn kind(&self) -> Kind<'_>;

    /// Returns this value as `Any`, used to dispatch custom validators.
    ///
    /// Transparent wrappers such as `Box` return the inner value.
    fn as_any(&self) -> &dyn Any;

    /// Returns the type name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A struct whose fields carry rules.
///
/// `field_values` must list the fields in the same order as the compiled
/// schema declares them. The [`model!`](crate::model) macro upholds this.
pub trait Model: Inspect {
    /// Returns the type's compiled rules, built once per process.
    fn compiled() -> &'static Result<ModelSchema, AnnotationError>
    where
        Self: Sized;

    /// Object-safe access to [`Model::compiled`].
    fn schema(&self) -> Result<&'static ModelSchema, &'static AnnotationError>;

    /// Returns the field values in declaration order.
    fn field_values(&self) -> Vec<&dyn Inspect>;

    /// Returns the self check capability, if the type opted in.
    fn as_self_check(&self) -> Option<&dyn SelfCheck> {
        None
    }

    /// Returns the dynamic field capability, if the type opted in.
    fn as_dynamic_field(&self) -> Option<&dyn DynamicField> {
        None
    }
}

/// The instant treated as an unset timestamp.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// Returns true if `value` holds its type's zero value.
///
/// `None`, empty text, zero numbers, `false`, empty collections, the zero
/// instant and models whose fields are all zero count as zero. `Some(_)` is
/// never zero, whatever it wraps.
pub fn is_zero(value: &dyn Inspect) -> bool {
    match value.kind() {
        Kind::Optional(inner) => inner.is_none(),
        Kind::Text(text) => text.is_empty(),
        Kind::Number(number) => number.is_zero(),
        Kind::Bool(flag) => !flag,
        Kind::Time(time) => time == zero_time(),
        Kind::List(items) => items.is_empty(),
        Kind::Map(entries) => entries.is_empty(),
        Kind::Model(model) => model.field_values().into_iter().all(|field| is_zero(field)),
        Kind::Open { is_empty } => is_empty,
    }
}

/// Strips optional layers, returning `None` when the value is absent.
pub fn unwrap_present(value: &dyn Inspect) -> Option<&dyn Inspect> {
    match value.kind() {
        Kind::Optional(Some(inner)) => unwrap_present(inner),
        Kind::Optional(None) => None,
        _ => Some(value),
    }
}
