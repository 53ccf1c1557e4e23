//! # Strictbind
//!
//! A fail-fast validation engine for typed request payloads.
//!
//! ## Overview
//!
//! Strictbind decodes JSON into your own structs, then checks them against
//! rules declared per field: presence, conditional presence, length and range,
//! numeric comparisons, decimal precision, patterns, named formats,
//! membership, custom validators and per-type hooks. A final pass rejects any
//! key in the input that the target type does not declare. The first
//! violation found is returned as a single [`ValidationError`].
//!
//! ## Core Types
//!
//! - [`model!`]: declares the rules of a struct and implements [`Model`] for it
//! - [`Validator`]: entry point for binding and validating
//! - [`ValidationError`]: the error, with a stable code, dotted path and message
//! - [`CustomRegistry`]: validators referenced by the `validate` rule
//! - [`SelfCheck`] and [`DynamicField`]: optional per-type hooks
//!
//! ## Example
//!
//! ```rust
//! use serde::Deserialize;
//! use strictbind::{model, ErrorKind, Validator};
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Context {
//!     #[serde(rename = "type")]
//!     kind: String,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct User {
//!     id: Option<String>,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Request {
//!     context: Context,
//!     user: User,
//! }
//!
//! model!(Context {
//!     kind: [name = "type", required, enums = "individual,organization"],
//! });
//! model!(User {
//!     id: [when = "context.type=individual;binding=required"],
//! });
//! model!(Request { context, user });
//!
//! let validator = Validator::new();
//! let mut request = Request::default();
//!
//! let err = validator
//!     .bind(br#"{"context": {"type": "individual"}, "user": {}}"#, &mut request)
//!     .unwrap_err();
//! assert_eq!(err.kind, ErrorKind::RequiredField);
//! assert_eq!(
//!     err.message,
//!     "The field 'user.id' is required when 'context.type' is 'individual'"
//! );
//!
//! validator
//!     .bind(br#"{"context": {"type": "organization"}, "user": {}}"#, &mut request)
//!     .unwrap();
//! ```

pub mod annotation;
pub mod compat;
pub mod condition;
pub mod config;
pub mod constraint;
pub mod decode;
pub mod engine;
pub mod error;
pub mod hooks;
mod macros;
pub mod path;
pub mod registry;
pub mod schema;
pub mod shape;
pub mod validation;

pub use annotation::FieldRules;
pub use compat::check_compatibility;
pub use condition::ConditionMap;
pub use config::ValidatorConfig;
pub use constraint::Format;
pub use decode::Timestamp;
pub use engine::Validator;
pub use error::{AnnotationError, ErrorKind, ValidationError};
pub use hooks::{DynamicField, SelfCheck};
pub use path::FieldPath;
pub use registry::{register_custom, CustomRegistry};
pub use schema::{Inspect, Kind, Model, ModelSchema, Number, Object};
pub use shape::Shape;
