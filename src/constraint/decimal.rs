//! Decimal precision constraints.

use crate::annotation::FieldRules;
use crate::error::{ErrorKind, ValidationError};
use crate::path::FieldPath;
use crate::schema::Number;

/// Digit counts of a number's plain decimal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digits {
    /// Significant digits: integer digits without sign or leading zeros, plus
    /// the fractional digits. Trailing zeros are never counted.
    pub total: usize,
    /// Fractional digits after trailing zeros are dropped.
    pub decimals: usize,
}

impl Digits {
    /// Counts the digits of `number`.
    ///
    /// Floats are rendered without exponent, so `12.3000` counts as three
    /// digits with one decimal place. Trailing zeros are trimmed from the
    /// whole rendering, so `100` counts as one digit.
    pub fn of(number: Number) -> Self {
        let rendered = number.to_string();
        let unsigned = rendered.trim_start_matches(['-', '+']);
        let trimmed = unsigned.trim_end_matches('0');
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let int_digits = int_part.trim_start_matches('0').len();

        Self {
            total: int_digits + frac_part.len(),
            decimals: frac_part.len(),
        }
    }
}

/// Checks `max_digits` and `decimal_places`.
///
/// Non-finite values carry no digits and are left to the finiteness check.
pub fn check_precision(
    rules: &FieldRules,
    number: Number,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    if rules.max_digits.is_none() && rules.decimal_places.is_none() {
        return Ok(());
    }
    if !number.as_f64().is_finite() {
        return Ok(());
    }

    let digits = Digits::of(number);

    if let Some(max_digits) = rules.max_digits {
        if digits.total > max_digits as usize {
            return Err(ValidationError::new(
                ErrorKind::MaxDigits,
                path.clone(),
                format!(
                    "The field <{}> must have at most {} total digits (got {})",
                    path, max_digits, digits.total
                ),
            )
            .with_expected(format!("at most {} digits", max_digits))
            .with_got(number.to_string()));
        }
    }

    if let Some(places) = rules.decimal_places {
        if digits.decimals > places as usize {
            return Err(ValidationError::new(
                ErrorKind::DecimalPlaces,
                path.clone(),
                format!(
                    "The field <{}> must have at most {} decimal places (got {})",
                    path, places, digits.decimals
                ),
            )
            .with_expected(format!("at most {} decimal places", places))
            .with_got(number.to_string()));
        }
    }

    Ok(())
}
