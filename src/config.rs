//! Engine configuration.

use serde::Deserialize;

/// Engine-wide switches.
///
/// Deserializable from any serde source; missing keys take their defaults.
///
/// # Example
///
/// ```rust
/// use strictbind::ValidatorConfig;
///
/// let config: ValidatorConfig =
///     serde_json::from_str(r#"{"sequence_minimum_zero": true}"#).unwrap();
/// assert!(config.sequence_minimum_zero);
/// assert!(!config.disable_compatibility_check);
///
/// let config = ValidatorConfig::default().with_suppress_required_checks(true);
/// assert!(config.suppress_required_checks);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Skip the `required` presence check. Conditional rules still apply.
    pub suppress_required_checks: bool,
    /// Accept empty sequences instead of reporting `EMPTY_LIST`.
    pub sequence_minimum_zero: bool,
    /// Skip the unknown-field check after binding.
    pub disable_compatibility_check: bool,
}

impl ValidatorConfig {
    pub fn with_suppress_required_checks(mut self, suppress: bool) -> Self {
        self.suppress_required_checks = suppress;
        self
    }

    pub fn with_sequence_minimum_zero(mut self, minimum_zero: bool) -> Self {
        self.sequence_minimum_zero = minimum_zero;
        self
    }

    pub fn with_disable_compatibility_check(mut self, disable: bool) -> Self {
        self.disable_compatibility_check = disable;
        self
    }

    /// Returns the minimum number of elements a sequence must hold.
    pub fn sequence_floor(&self) -> usize {
        if self.sequence_minimum_zero {
            0
        } else {
            1
        }
    }
}
