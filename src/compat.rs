//! The unknown-field compatibility check.
//!
//! Compares a generic JSON tree against a [`Shape`] and rejects the first key
//! the shape does not declare, at any depth. Sequence elements are all held
//! to the sequence's exemplar.

use serde_json::Value;

use crate::error::{ErrorKind, ValidationError};
use crate::path::FieldPath;
use crate::shape::Shape;

/// Checks that `tree` carries no keys beyond those declared by `shape`.
///
/// `null` matches any shape and [`Shape::Open`] matches any value. An object
/// shape with no keys declares nothing to compare against and admits any
/// object. Only container values are checked for kind: an object or array
/// where the shape expects something else is `TYPE_MISMATCH`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strictbind::{check_compatibility, Shape};
///
/// let shape = Shape::from_json(&json!({"name": "", "object": {"inner": 1}}));
///
/// assert!(check_compatibility(&json!({"object": {"inner": 2}}), &shape).is_ok());
///
/// let err = check_compatibility(&json!({"object": {"extraField": 1}}), &shape).unwrap_err();
/// assert_eq!(err.to_string(), "object.extraField: Invalid field <object.extraField>");
/// ```
pub fn check_compatibility(tree: &Value, shape: &Shape) -> Result<(), ValidationError> {
    check_node(tree, shape, &FieldPath::root())
}

fn check_node(tree: &Value, shape: &Shape, path: &FieldPath) -> Result<(), ValidationError> {
    match (tree, shape) {
        (Value::Null, _) | (_, Shape::Open) => Ok(()),
        (Value::Object(map), Shape::Object(fields)) => {
            if fields.is_empty() {
                return Ok(());
            }
            for (key, child) in map {
                let child_path = path.push_field(key.as_str());
                let Some(child_shape) = fields.get(key) else {
                    return Err(ValidationError::new(
                        ErrorKind::InvalidField,
                        child_path.clone(),
                        format!("Invalid field <{}>", child_path),
                    ));
                };
                check_node(child, child_shape, &child_path)?;
            }
            Ok(())
        }
        (Value::Array(items), Shape::List(_)) => {
            let Some(exemplar) = shape.exemplar() else {
                return Ok(());
            };
            for item in items {
                check_node(item, exemplar, path)?;
            }
            Ok(())
        }
        (Value::Object(_) | Value::Array(_), _) => Err(mismatch(tree, shape, path)),
        // scalar kinds are settled by the typed decode
        _ => Ok(()),
    }
}

fn mismatch(tree: &Value, shape: &Shape, path: &FieldPath) -> ValidationError {
    let got = match tree {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    };
    ValidationError::new(
        ErrorKind::TypeMismatch,
        path.clone(),
        format!(
            "The field <{}> must be of type {}, got {}",
            path,
            shape.describe(),
            got
        ),
    )
    .with_expected(shape.describe())
    .with_got(got)
}
