//! Pattern, named format and membership constraints.

use crate::annotation::FieldRules;
use crate::error::{ErrorKind, ValidationError};
use crate::path::FieldPath;
use crate::schema::Number;

/// Checks the `regex` rule against the whole value.
pub fn check_pattern(rules: &FieldRules, text: &str, path: &FieldPath) -> Result<(), ValidationError> {
    let Some(pattern) = &rules.pattern else {
        return Ok(());
    };
    if pattern.is_match(text) {
        return Ok(());
    }
    Err(ValidationError::new(
        ErrorKind::InvalidPattern,
        path.clone(),
        format!(
            "The field <{}> does not match the pattern '{}'",
            path,
            pattern.as_str()
        ),
    )
    .with_expected(format!("string matching '{}'", pattern.as_str()))
    .with_got(text))
}

/// Checks the `format` rule.
pub fn check_format(rules: &FieldRules, text: &str, path: &FieldPath) -> Result<(), ValidationError> {
    let Some(format) = rules.format else {
        return Ok(());
    };
    if format.matches(text) {
        return Ok(());
    }
    Err(ValidationError::new(
        ErrorKind::InvalidFormat(format),
        path.clone(),
        format!("The field <{}> must be a valid {}", path, format),
    )
    .with_expected(format.name())
    .with_got(text))
}

/// Checks `enum`/`enums` membership against the value's text.
pub fn check_membership(
    rules: &FieldRules,
    literal: &str,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    let Some(allowed) = &rules.membership else {
        return Ok(());
    };
    if allowed.iter().any(|candidate| candidate == literal) {
        return Ok(());
    }
    Err(not_a_member(allowed, literal, path))
}

/// Checks `enum`/`enums` membership of a number by value, so `2` matches a
/// declared `2.0`.
pub fn check_number_membership(
    rules: &FieldRules,
    number: Number,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    let Some(allowed) = &rules.membership else {
        return Ok(());
    };
    let value = number.as_f64();
    if allowed
        .iter()
        .any(|candidate| candidate.parse::<f64>().is_ok_and(|candidate| candidate == value))
    {
        return Ok(());
    }
    Err(not_a_member(allowed, &number.to_string(), path))
}

fn not_a_member(allowed: &[String], literal: &str, path: &FieldPath) -> ValidationError {
    let expected = allowed.join(", ");
    ValidationError::new(
        ErrorKind::InvalidEnum,
        path.clone(),
        format!("The field <{}> must be one of [{}]", path, expected),
    )
    .with_expected(expected)
    .with_got(literal)
}
