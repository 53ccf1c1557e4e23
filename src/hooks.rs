//! Capability hooks a model may opt into.
//!
//! - [`SelfCheck`]: a zero-argument check run after every built-in rule on
//!   the value.
//! - [`DynamicField`]: a tagged field whose value type is declared at runtime
//!   (`{"value": 18, "valueType": "numeric", "attribute": "age"}`).
//!
//! Models opt in through the [`model!`](crate::model) macro
//! (`model!(T { .. } + SelfCheck)`), which makes
//! [`Model::as_self_check`](crate::Model::as_self_check) or
//! [`Model::as_dynamic_field`](crate::Model::as_dynamic_field) return the value.

use serde_json::Value;

use crate::error::{ErrorKind, ValidationError};
use crate::path::FieldPath;
use crate::schema::Model;

/// Validation logic a model runs on itself.
///
/// An error left without a path is reported at the model's field path.
pub trait SelfCheck {
    fn self_check(&self) -> Result<(), ValidationError>;
}

/// A field whose value type is declared alongside the value.
///
/// Accepted type names: `numeric` (aliases `number`, `integer`, `int`),
/// `string`, `float` and `boolean`. Any other name is itself an error.
/// `numeric` needs an integral number; `float` takes any number, so `3` on
/// the wire is a valid float.
pub trait DynamicField {
    fn dynamic_value(&self) -> &Value;
    fn value_type(&self) -> &str;
    fn attribute(&self) -> &str;
}

/// Checks a dynamic field's value against its declared type.
///
/// Errors are located at `path.<attribute>`.
pub fn check_dynamic_field(
    field: &dyn DynamicField,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    let attribute = field.attribute();
    let value = field.dynamic_value();
    let full_path = path.push_field(attribute);

    let (accepted, expected) = match field.value_type() {
        "numeric" | "number" | "integer" | "int" => (is_integral(value), "numeric"),
        "string" => (value.is_string(), "string"),
        "float" => (value.is_number(), "float"),
        "boolean" => (value.is_boolean(), "boolean"),
        other => {
            return Err(ValidationError::new(
                ErrorKind::InvalidValueType,
                full_path.clone(),
                format!(
                    "Invalid value type '{}' for field '{}' at path '{}'.",
                    other, attribute, full_path
                ),
            ))
        }
    };

    if accepted {
        return Ok(());
    }
    Err(ValidationError::new(
        ErrorKind::InvalidValueType,
        full_path.clone(),
        format!(
            "Invalid value type for field '{}' at path '{}'. Expected {} value.",
            attribute, full_path, expected
        ),
    )
    .with_expected(expected)
    .with_got(value.to_string()))
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}

/// Runs the capability hooks of `model`, self check first.
pub(crate) fn run_hooks(model: &dyn Model, path: &FieldPath) -> Result<(), ValidationError> {
    if let Some(check) = model.as_self_check() {
        check
            .self_check()
            .map_err(|err| err.backfill_path(path))?;
    }
    if let Some(field) = model.as_dynamic_field() {
        check_dynamic_field(field, path)?;
    }
    Ok(())
}
