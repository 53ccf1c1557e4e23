//! Custom validator registry.
//!
//! This module provides the [`CustomRegistry`] type that maps a
//! `(field type, tag)` pair to a validation function. Fields opt into custom
//! validators with the `validate` rule (`validate = "slug,reserved"`).

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::error::{ErrorKind, ValidationError};
use crate::path::FieldPath;
use crate::schema::Inspect;

/// A registered validator, erased over its field type.
pub type CustomFn = Arc<dyn Fn(&dyn Inspect, &FieldPath) -> Result<(), ValidationError> + Send + Sync>;

/// Type alias for the validator storage map.
type ValidatorMap = Arc<RwLock<HashMap<(TypeId, String), CustomFn>>>;

static GLOBAL: LazyLock<CustomRegistry> = LazyLock::new(CustomRegistry::new);

/// A thread-safe registry of custom validators.
///
/// Validators are keyed by the field's type (after unwrapping `Option` and
/// `Box`) and a tag. Registering the same pair again replaces the previous
/// function.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use strictbind::{CustomRegistry, FieldPath, ValidationError};
///
/// let registry = CustomRegistry::new();
/// registry.register::<String, _>("slug", |value, _path| {
///     if value.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
///         Ok(())
///     } else {
///         Err(ValidationError::custom("INVALID_SLUG", "Slug format is invalid"))
///     }
/// });
///
/// assert!(registry.contains::<String>("slug"));
/// ```
pub struct CustomRegistry {
    validators: ValidatorMap,
}

impl CustomRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the process-wide registry used by [`Validator::new`](crate::Validator::new).
    pub fn global() -> &'static CustomRegistry {
        &GLOBAL
    }

    /// Registers `validator` for fields of type `T` carrying `tag`.
    ///
    /// Replaces any validator previously registered under the same pair.
    pub fn register<T, F>(&self, tag: impl Into<String>, validator: F)
    where
        T: Any,
        F: Fn(&T, &FieldPath) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let tag = tag.into();
        let erased: CustomFn = Arc::new(move |value: &dyn Inspect, path: &FieldPath| {
            match value.as_any().downcast_ref::<T>() {
                Some(typed) => validator(typed, path),
                None => Err(ValidationError::new(
                    ErrorKind::InvalidType,
                    path.clone(),
                    format!(
                        "Expected type {} but got {}",
                        type_name::<T>(),
                        value.type_name()
                    ),
                )),
            }
        });

        let replaced = self
            .validators
            .write()
            .insert((TypeId::of::<T>(), tag.clone()), erased)
            .is_some();
        tracing::debug!(tag = %tag, ty = type_name::<T>(), replaced, "registered custom validator");
    }

    /// Removes the validator for `(T, tag)`, returning true if one was registered.
    pub fn unregister<T: Any>(&self, tag: &str) -> bool {
        self.validators
            .write()
            .remove(&(TypeId::of::<T>(), tag.to_string()))
            .is_some()
    }

    /// Returns true if a validator is registered for `(T, tag)`.
    pub fn contains<T: Any>(&self, tag: &str) -> bool {
        self.lookup(TypeId::of::<T>(), tag).is_some()
    }

    /// Looks up the validator for a runtime type and tag.
    pub fn lookup(&self, type_id: TypeId, tag: &str) -> Option<CustomFn> {
        self.validators
            .read()
            .get(&(type_id, tag.to_string()))
            .cloned()
    }

    /// Returns the number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Runs the validators for `tags` against `value`, in order.
    ///
    /// `value` must already be unwrapped. Tags with no registered validator
    /// are skipped with a warning. The first error wins; if it carries no
    /// path it is reported at `path`.
    pub(crate) fn run(
        &self,
        value: &dyn Inspect,
        tags: &[String],
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        let type_id = value.as_any().type_id();
        for tag in tags {
            match self.lookup(type_id, tag) {
                Some(validator) => {
                    tracing::trace!(tag = %tag, path = %path, "running custom validator");
                    validator(value, path).map_err(|err| err.backfill_path(path))?;
                }
                None => {
                    tracing::warn!(
                        tag = %tag,
                        ty = value.type_name(),
                        path = %path,
                        "no custom validator registered for tag"
                    );
                }
            }
        }
        Ok(())
    }
}

impl Default for CustomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CustomRegistry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
        }
    }
}

impl fmt::Debug for CustomRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRegistry")
            .field("validators", &self.len())
            .finish()
    }
}

/// Registers a validator in the process-wide registry.
///
/// Shorthand for `CustomRegistry::global().register::<T, F>(tag, validator)`.
pub fn register_custom<T, F>(tag: impl Into<String>, validator: F)
where
    T: Any,
    F: Fn(&T, &FieldPath) -> Result<(), ValidationError> + Send + Sync + 'static,
{
    CustomRegistry::global().register::<T, F>(tag, validator);
}
