//! The validation error type.
//!
//! Validation is fail-fast: every call yields at most one [`ValidationError`].

use std::borrow::Cow;
use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

use crate::constraint::Format;
use crate::path::FieldPath;

/// Machine-readable category of a validation failure.
///
/// Each kind renders as a stable upper-case code (see [`ErrorKind::code`]),
/// suitable for API responses and programmatic matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A `required` field (or a conditionally required one) is zero-valued.
    RequiredField,
    /// Text is empty after trimming whitespace.
    EmptyString,
    /// A sequence is shorter than the configured floor.
    EmptyList,
    /// An ignored field was populated, or the body carries an undeclared field.
    InvalidField,
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    NotMultiple,
    /// NaN or an infinity without `allow_inf_nan`.
    InvalidFloat,
    MaxDigits,
    DecimalPlaces,
    InvalidPattern,
    /// A named format check failed; renders as `INVALID_<FORMAT>`.
    InvalidFormat(Format),
    InvalidEnum,
    /// A dynamic field's value does not match its declared type, or the
    /// declared type name is unknown.
    InvalidValueType,
    /// A custom validator was invoked with a value of the wrong runtime type.
    InvalidType,
    TypeMismatch,
    Syntax,
    InvalidJson,
    EmptyJson,
    InvalidTime,
    /// The target type's rule set failed to compile.
    InvalidAnnotation,
    /// A code chosen by a custom validator or self check.
    Custom(String),
}

impl ErrorKind {
    /// Returns the stable code for this kind, e.g. `REQUIRED_FIELD`.
    pub fn code(&self) -> Cow<'_, str> {
        let code = match self {
            ErrorKind::RequiredField => "REQUIRED_FIELD",
            ErrorKind::EmptyString => "EMPTY_STRING",
            ErrorKind::EmptyList => "EMPTY_LIST",
            ErrorKind::InvalidField => "INVALID_FIELD",
            ErrorKind::MinLength => "MIN_LENGTH",
            ErrorKind::MaxLength => "MAX_LENGTH",
            ErrorKind::MinValue => "MIN_VALUE",
            ErrorKind::MaxValue => "MAX_VALUE",
            ErrorKind::GreaterThan => "GREATER_THAN",
            ErrorKind::GreaterThanEqual => "GREATER_THAN_EQUAL",
            ErrorKind::LessThan => "LESS_THAN",
            ErrorKind::LessThanEqual => "LESS_THAN_EQUAL",
            ErrorKind::NotMultiple => "NOT_MULTIPLE",
            ErrorKind::InvalidFloat => "INVALID_FLOAT",
            ErrorKind::MaxDigits => "MAX_DIGITS",
            ErrorKind::DecimalPlaces => "DECIMAL_PLACES",
            ErrorKind::InvalidPattern => "INVALID_PATTERN",
            ErrorKind::InvalidFormat(format) => {
                return Cow::Owned(format!(
                    "INVALID_{}",
                    format.name().replace('-', "_").to_ascii_uppercase()
                ))
            }
            ErrorKind::InvalidEnum => "INVALID_ENUM",
            ErrorKind::InvalidValueType => "INVALID_VALUE_TYPE",
            ErrorKind::InvalidType => "INVALID_TYPE",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::Syntax => "SYNTAX",
            ErrorKind::InvalidJson => "INVALID_JSON",
            ErrorKind::EmptyJson => "EMPTY_JSON",
            ErrorKind::InvalidTime => "INVALID_TIME",
            ErrorKind::InvalidAnnotation => "INVALID_ANNOTATION",
            ErrorKind::Custom(code) => code.as_str(),
        };
        Cow::Borrowed(code)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

/// A validation failure with full context.
///
/// `ValidationError` captures all relevant information about a failure:
/// - **kind**: Machine-readable category, rendered as a stable code
/// - **path**: Dotted location of the offending field (`user.address.city`)
/// - **message**: Human-readable description of the failure
/// - **got**: The actual value that failed validation (optional)
/// - **expected**: What was expected instead (optional)
///
/// # Example
///
/// ```rust
/// use strictbind::{ErrorKind, FieldPath, ValidationError};
///
/// let error = ValidationError::new(
///     ErrorKind::MinLength,
///     FieldPath::parse("user.name"),
///     "must have at least 3 characters",
/// )
/// .with_got("ab")
/// .with_expected("length >= 3");
///
/// assert_eq!(error.code(), "MIN_LENGTH");
/// assert_eq!(error.path.to_string(), "user.name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// The failure category.
    pub kind: ErrorKind,
    /// The path to the value that failed validation.
    pub path: FieldPath,
    /// Human-readable error message.
    pub message: String,
    /// The actual value that was received (formatted as string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub got: Option<String>,
    /// Description of what was expected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ErrorKind, path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            message: message.into(),
            got: None,
            expected: None,
        }
    }

    /// Creates an error with a caller-chosen code and no path.
    ///
    /// Intended for custom validators and self checks: the engine fills in the
    /// path of the field being validated.
    pub fn custom(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom(code.into()), FieldPath::root(), message)
    }

    /// Sets the path and returns self for chaining.
    pub fn with_path(mut self, path: FieldPath) -> Self {
        self.path = path;
        self
    }

    /// Sets the "got" (actual value) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Returns the stable code of this error's kind.
    pub fn code(&self) -> Cow<'_, str> {
        self.kind.code()
    }

    /// Fills in `path` when the error carries none. An existing path is kept.
    pub(crate) fn backfill_path(mut self, path: &FieldPath) -> Self {
        if self.path.is_root() {
            self.path = path.clone();
        }
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = ValidationError::new(
            ErrorKind::RequiredField,
            FieldPath::from_field("name"),
            "field is required",
        );

        assert_eq!(error.path, FieldPath::from_field("name"));
        assert_eq!(error.message, "field is required");
        assert_eq!(error.code(), "REQUIRED_FIELD");
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
    }

    #[test]
    fn test_error_builder() {
        let error = ValidationError::new(ErrorKind::MinValue, FieldPath::root(), "too small")
            .with_path(FieldPath::parse("user.age"))
            .with_got("-5")
            .with_expected("value >= 0");

        assert_eq!(error.path.to_string(), "user.age");
        assert_eq!(error.got, Some("-5".to_string()));
        assert_eq!(error.expected, Some("value >= 0".to_string()));
    }

    #[test]
    fn test_error_display() {
        let error = ValidationError::new(
            ErrorKind::InvalidFormat(Format::Email),
            FieldPath::from_field("email"),
            "invalid format",
        )
        .with_expected("email address")
        .with_got("not-an-email");

        let display = error.to_string();
        assert!(display.contains("email: invalid format"));
        assert!(display.contains("expected: email address"));
        assert!(display.contains("got: not-an-email"));
    }

    #[test]
    fn test_error_display_root() {
        let error = ValidationError::new(ErrorKind::EmptyJson, FieldPath::root(), "empty body");
        assert!(error.to_string().contains("(root): empty body"));
    }

    #[test]
    fn test_format_codes() {
        assert_eq!(ErrorKind::InvalidFormat(Format::Email).code(), "INVALID_EMAIL");
        assert_eq!(
            ErrorKind::InvalidFormat(Format::CreditCardExpiry).code(),
            "INVALID_CREDIT_CARD_EXPIRY"
        );
        assert_eq!(ErrorKind::InvalidFormat(Format::MzMsisdn).code(), "INVALID_MZ_MSISDN");
    }

    #[test]
    fn test_custom_code() {
        let error = ValidationError::custom("NEGATIVE_VALUE_ERR", "must not be negative");
        assert_eq!(error.code(), "NEGATIVE_VALUE_ERR");
        assert!(error.path.is_root());
    }

    #[test]
    fn test_backfill_keeps_existing_path() {
        let field = FieldPath::from_field("slug");

        let blank = ValidationError::custom("BAD_SLUG", "bad").backfill_path(&field);
        assert_eq!(blank.path, field);

        let explicit = ValidationError::custom("BAD_SLUG", "bad")
            .with_path(FieldPath::from_field("other"))
            .backfill_path(&field);
        assert_eq!(explicit.path.to_string(), "other");
    }

    #[test]
    fn test_serializes_for_api_responses() {
        let error = ValidationError::new(
            ErrorKind::InvalidField,
            FieldPath::parse("object.extraField"),
            "Invalid field <object.extraField>",
        );

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({
                "kind": "INVALID_FIELD",
                "path": "object.extraField",
                "message": "Invalid field <object.extraField>"
            })
        );
    }
}
