//! The top-level validator.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::compat;
use crate::config::ValidatorConfig;
use crate::decode::{decode_tree, decode_typed};
use crate::error::{AnnotationError, ValidationError};
use crate::registry::CustomRegistry;
use crate::schema::{Inspect, Model, ModelSchema};
use crate::shape::Shape;
use crate::validation::ValidationContext;

/// Binds JSON input to typed models and validates them.
///
/// A `Validator` is cheap to clone and can be shared across threads. Clones
/// share the same [`CustomRegistry`].
///
/// # Example
///
/// ```rust
/// use strictbind::{model, ErrorKind, Validator};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Signup {
///     #[serde(default)]
///     email: String,
///     age: Option<u32>,
/// }
///
/// model!(Signup {
///     email: [required, format = "email"],
///     age: [min = 18],
/// });
///
/// let validator = Validator::new();
/// let mut signup = Signup::default();
///
/// validator
///     .bind(br#"{"email": "ana@example.com", "age": 30}"#, &mut signup)
///     .unwrap();
/// assert_eq!(signup.age, Some(30));
///
/// let err = validator.bind(br#"{"age": 30}"#, &mut signup).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::RequiredField);
///
/// let err = validator
///     .bind(br#"{"email": "ana@example.com", "nickname": "a"}"#, &mut signup)
///     .unwrap_err();
/// assert_eq!(err.to_string(), "nickname: Invalid field <nickname>");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    registry: CustomRegistry,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates a validator with the default configuration and the
    /// process-wide registry.
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
            registry: CustomRegistry::global().clone(),
        }
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `registry` instead of the process-wide one.
    pub fn with_registry(mut self, registry: CustomRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &CustomRegistry {
        &self.registry
    }

    /// Decodes `bytes` into `target` and validates the result.
    ///
    /// Stages run in order and the first error wins:
    ///
    /// 1. typed decode (`SYNTAX`, `TYPE_MISMATCH`, `INVALID_TIME`)
    /// 2. generic decode (`INVALID_JSON`, `EMPTY_JSON`)
    /// 3. reference shape from the populated instance
    /// 4. field validation
    /// 5. unknown-field check, unless disabled
    ///
    /// `target` is only replaced once the typed decode succeeds, and keeps
    /// the decoded value when a later stage fails.
    pub fn bind<M>(&self, bytes: &[u8], target: &mut M) -> Result<(), ValidationError>
    where
        M: Model + DeserializeOwned,
    {
        let decoded: M = decode_typed(bytes).inspect_err(|err| {
            tracing::debug!(code = %err.kind, path = %err.path, "typed decode failed");
        })?;
        *target = decoded;

        let tree = decode_tree(bytes).inspect_err(|err| {
            tracing::debug!(code = %err.kind, "generic decode failed");
        })?;

        let shape = Shape::of(&*target);

        self.validate(&*target)?;

        if self.config.disable_compatibility_check {
            tracing::trace!("compatibility check disabled");
            return Ok(());
        }
        compat::check_compatibility(&Value::Object(tree), &shape).inspect_err(|err| {
            tracing::debug!(path = %err.path, "unknown field rejected");
        })
    }

    /// Validates an already populated value.
    pub fn validate<T: Inspect>(&self, value: &T) -> Result<(), ValidationError> {
        let context = ValidationContext::new(&self.config, &self.registry, value);
        context.validate(value).inspect_err(|err| {
            tracing::debug!(
                ty = value.type_name(),
                code = %err.kind,
                path = %err.path,
                "validation failed"
            );
        })
    }

    /// Checks `tree` for keys that `reference` does not declare.
    ///
    /// Runs regardless of `disable_compatibility_check`.
    pub fn check_compatibility<T: Inspect>(
        &self,
        tree: &Value,
        reference: &T,
    ) -> Result<(), ValidationError> {
        compat::check_compatibility(tree, &Shape::of(reference))
    }

    /// Compiles the rules of `M` now rather than on first use.
    pub fn register_model<M: Model>(&self) -> Result<&'static ModelSchema, AnnotationError> {
        match M::compiled() {
            Ok(schema) => {
                tracing::debug!(model = schema.type_name(), fields = schema.len(), "registered model");
                Ok(schema)
            }
            Err(err) => Err(err.clone()),
        }
    }
}
