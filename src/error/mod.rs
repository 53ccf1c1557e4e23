//! Error types for binding and validation failures.
//!
//! This module provides [`ValidationError`], the single structured error a
//! validation call produces, its machine-readable [`ErrorKind`], and
//! [`AnnotationError`] for rule sets that fail to compile.

mod annotation_error;
mod validation_error;

pub use annotation_error::AnnotationError;
pub use validation_error::{ErrorKind, ValidationError};
