//! Errors raised while compiling a type's field rules.

use thiserror::Error;

/// A rule set that cannot be compiled into a [`ModelSchema`](crate::ModelSchema).
///
/// These are programming errors in the target type's declaration. They are
/// cached alongside the compiled schema, surfaced eagerly by
/// [`Validator::register_model`](crate::Validator::register_model), and
/// reported as `INVALID_ANNOTATION` when an affected type is validated.
#[derive(Debug, Clone, Error)]
pub enum AnnotationError {
    /// The rule name is not part of the vocabulary.
    #[error("{model}.{field}: unknown rule '{rule}'")]
    UnknownRule {
        model: &'static str,
        field: String,
        rule: String,
    },

    /// A rule parameter is missing or outside the rule's accepted values.
    #[error("{model}.{field}: rule '{rule}' {reason}")]
    InvalidValue {
        model: &'static str,
        field: String,
        rule: String,
        reason: &'static str,
    },

    /// A numeric rule parameter did not parse.
    #[error("{model}.{field}: rule '{rule}' expects a number, got '{value}'")]
    InvalidNumber {
        model: &'static str,
        field: String,
        rule: String,
        value: String,
    },

    /// The `regex` parameter is not a valid regular expression.
    #[error("{model}.{field}: invalid regex: {source}")]
    InvalidRegex {
        model: &'static str,
        field: String,
        #[source]
        source: regex::Error,
    },

    /// The `format` parameter names no known format.
    #[error("{model}.{field}: unknown format '{format}'")]
    UnknownFormat {
        model: &'static str,
        field: String,
        format: String,
    },

    /// A `when` clause is malformed.
    #[error("{model}.{field}: invalid when clause '{clause}': {reason}")]
    InvalidCondition {
        model: &'static str,
        field: String,
        clause: String,
        reason: &'static str,
    },

    /// Two fields share one wire name.
    #[error("{model}: duplicate field name '{field}'")]
    DuplicateField { model: &'static str, field: String },
}
