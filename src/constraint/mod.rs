//! Stateless constraint evaluators.
//!
//! Each evaluator checks one family of rules against an already unwrapped
//! value and returns the first violation it finds. The field pipeline in
//! [`validation`](crate::validation) calls them in a fixed order.

mod decimal;
mod format;
mod numeric;
mod text;

pub use decimal::{check_precision, Digits};
pub use format::{Format, UnknownFormat};
pub use numeric::{check_bounds, check_comparisons, check_length};
pub use text::{check_format, check_membership, check_number_membership, check_pattern};
