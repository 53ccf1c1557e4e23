//! Typed views of values for validation.
//!
//! Rust has no runtime reflection, so the validator sees values through the
//! [`Inspect`] trait: each value reports its [`Kind`] (text, number, list,
//! model and so on). Structs with field rules implement [`Model`], which adds
//! their compiled [`ModelSchema`] and field values in declaration order.
//!
//! The [`model!`](crate::model) macro generates both impls.
//!
//! # Example
//!
//! ```rust
//! use strictbind::schema::{Inspect, Kind};
//! use strictbind::model;
//!
//! struct Signup {
//!     email: String,
//!     age: Option<u32>,
//! }
//!
//! model!(Signup {
//!     email: [required, format = "email"],
//!     age: [ge = 18],
//! });
//!
//! let signup = Signup { email: "a@b.co".into(), age: None };
//! assert!(matches!(signup.kind(), Kind::Model(_)));
//! ```

mod impls;
mod model;
mod object;
mod traits;

pub use model::{FieldDecl, ModelSchema};
pub use object::Object;
pub use traits::{is_zero, unwrap_present, zero_time, Inspect, Kind, Model, Number};
