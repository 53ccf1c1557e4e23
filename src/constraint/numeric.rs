//! Length, range and numeric comparison constraints.

use crate::annotation::FieldRules;
use crate::error::{ErrorKind, ValidationError};
use crate::path::FieldPath;
use crate::schema::Number;

const MULTIPLE_TOLERANCE: f64 = 1e-9;

/// Checks `min`/`max` as a count of characters or items.
pub fn check_length(
    rules: &FieldRules,
    len: usize,
    unit: &str,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    let count = len as f64;
    if let Some(min) = rules.min {
        if count < min {
            return Err(ValidationError::new(
                ErrorKind::MinLength,
                path.clone(),
                format!(
                    "The field <{}> must have at least {} {}, but has {}",
                    path, min, unit, len
                ),
            )
            .with_expected(format!("at least {} {}", min, unit))
            .with_got(format!("{} {}", len, unit)));
        }
    }
    if let Some(max) = rules.max {
        if count > max {
            return Err(ValidationError::new(
                ErrorKind::MaxLength,
                path.clone(),
                format!(
                    "The field <{}> must have at most {} {}, but has {}",
                    path, max, unit, len
                ),
            )
            .with_expected(format!("at most {} {}", max, unit))
            .with_got(format!("{} {}", len, unit)));
        }
    }
    Ok(())
}

/// Checks `min`/`max` as value bounds.
pub fn check_bounds(rules: &FieldRules, number: Number, path: &FieldPath) -> Result<(), ValidationError> {
    let value = number.as_f64();
    if let Some(min) = rules.min {
        if value < min {
            return Err(ValidationError::new(
                ErrorKind::MinValue,
                path.clone(),
                format!("The field <{}> must be at least {}, but was {}", path, min, number),
            )
            .with_expected(format!(">= {}", min))
            .with_got(number.to_string()));
        }
    }
    if let Some(max) = rules.max {
        if value > max {
            return Err(ValidationError::new(
                ErrorKind::MaxValue,
                path.clone(),
                format!("The field <{}> must be at most {}, but was {}", path, max, number),
            )
            .with_expected(format!("<= {}", max))
            .with_got(number.to_string()));
        }
    }
    Ok(())
}

/// Checks finiteness, `gt`/`ge`/`lt`/`le` and `multiple_of`.
///
/// NaN and infinities are rejected first unless `allow_inf_nan` is set.
pub fn check_comparisons(
    rules: &FieldRules,
    number: Number,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    let value = number.as_f64();

    if !rules.allow_inf_nan && !value.is_finite() {
        return Err(ValidationError::new(
            ErrorKind::InvalidFloat,
            path.clone(),
            format!("The field <{}> cannot be NaN or infinite", path),
        )
        .with_got(number.to_string()));
    }

    let comparisons: [(Option<f64>, fn(f64, f64) -> bool, ErrorKind, &str); 4] = [
        (rules.gt, |v, t| v > t, ErrorKind::GreaterThan, "greater than"),
        (rules.ge, |v, t| v >= t, ErrorKind::GreaterThanEqual, "greater than or equal to"),
        (rules.lt, |v, t| v < t, ErrorKind::LessThan, "less than"),
        (rules.le, |v, t| v <= t, ErrorKind::LessThanEqual, "less than or equal to"),
    ];
    for (threshold, holds, kind, phrase) in comparisons {
        let Some(threshold) = threshold else {
            continue;
        };
        if !holds(value, threshold) {
            return Err(ValidationError::new(
                kind,
                path.clone(),
                format!("The field <{}> must be {} {}", path, phrase, threshold),
            )
            .with_expected(format!("{} {}", phrase, threshold))
            .with_got(number.to_string()));
        }
    }

    if let Some(base) = rules.multiple_of {
        if value.is_finite() && !is_multiple(value, base) {
            return Err(ValidationError::new(
                ErrorKind::NotMultiple,
                path.clone(),
                format!("The field <{}> must be a multiple of {}", path, base),
            )
            .with_expected(format!("multiple of {}", base))
            .with_got(number.to_string()));
        }
    }

    Ok(())
}

fn is_multiple(value: f64, base: f64) -> bool {
    let remainder = (value % base).abs();
    let base = base.abs();
    remainder < MULTIPLE_TOLERANCE || (base - remainder) < MULTIPLE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(configure: impl FnOnce(&mut FieldRules)) -> FieldRules {
        let mut rules = FieldRules::named("value");
        configure(&mut rules);
        rules
    }

    fn path() -> FieldPath {
        FieldPath::from_field("value")
    }

    #[test]
    fn test_length_bounds() {
        let rules = rules(|r| {
            r.min = Some(3.0);
            r.max = Some(5.0);
        });

        assert!(check_length(&rules, 3, "characters", &path()).is_ok());
        assert!(check_length(&rules, 5, "characters", &path()).is_ok());

        let err = check_length(&rules, 2, "characters", &path()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MinLength);
        assert_eq!(
            err.message,
            "The field <value> must have at least 3 characters, but has 2"
        );

        let err = check_length(&rules, 6, "items", &path()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MaxLength);
    }

    #[test]
    fn test_value_bounds() {
        let rules = rules(|r| {
            r.min = Some(1.5);
            r.max = Some(3.5);
        });

        assert!(check_bounds(&rules, Number::Float(2.0), &path()).is_ok());
        assert_eq!(
            check_bounds(&rules, Number::Float(1.0), &path()).unwrap_err().kind,
            ErrorKind::MinValue
        );
        assert_eq!(
            check_bounds(&rules, Number::Int(4), &path()).unwrap_err().kind,
            ErrorKind::MaxValue
        );
    }

    #[test]
    fn test_comparisons() {
        let gt = rules(|r| r.gt = Some(18.0));
        assert!(check_comparisons(&gt, Number::Int(19), &path()).is_ok());
        assert_eq!(
            check_comparisons(&gt, Number::Int(18), &path()).unwrap_err().kind,
            ErrorKind::GreaterThan
        );

        let ge = rules(|r| r.ge = Some(18.0));
        assert!(check_comparisons(&ge, Number::Int(18), &path()).is_ok());
        assert_eq!(
            check_comparisons(&ge, Number::Int(17), &path()).unwrap_err().kind,
            ErrorKind::GreaterThanEqual
        );

        let lt = rules(|r| r.lt = Some(65.0));
        assert_eq!(
            check_comparisons(&lt, Number::UInt(65), &path()).unwrap_err().kind,
            ErrorKind::LessThan
        );

        let le = rules(|r| r.le = Some(30.0));
        assert!(check_comparisons(&le, Number::Int(30), &path()).is_ok());
        assert_eq!(
            check_comparisons(&le, Number::Int(31), &path()).unwrap_err().kind,
            ErrorKind::LessThanEqual
        );
    }

    #[test]
    fn test_multiple_of_with_tolerance() {
        let five = rules(|r| r.multiple_of = Some(5.0));
        assert!(check_comparisons(&five, Number::Int(25), &path()).is_ok());
        assert!(check_comparisons(&five, Number::Int(-10), &path()).is_ok());
        assert_eq!(
            check_comparisons(&five, Number::Int(26), &path()).unwrap_err().kind,
            ErrorKind::NotMultiple
        );

        let tenth = rules(|r| r.multiple_of = Some(0.1));
        assert!(check_comparisons(&tenth, Number::Float(0.3), &path()).is_ok());

        let half = rules(|r| r.multiple_of = Some(0.5));
        assert!(check_comparisons(&half, Number::Float(2.5), &path()).is_ok());
        assert!(check_comparisons(&half, Number::Float(2.3), &path()).is_err());
    }

    #[test]
    fn test_inf_nan() {
        let strict = FieldRules::named("value");
        assert_eq!(
            check_comparisons(&strict, Number::Float(f64::NAN), &path()).unwrap_err().kind,
            ErrorKind::InvalidFloat
        );
        assert_eq!(
            check_comparisons(&strict, Number::Float(f64::INFINITY), &path())
                .unwrap_err()
                .kind,
            ErrorKind::InvalidFloat
        );

        let relaxed = rules(|r| {
            r.allow_inf_nan = true;
            r.multiple_of = Some(2.0);
        });
        assert!(check_comparisons(&relaxed, Number::Float(f64::NAN), &path()).is_ok());
        assert!(check_comparisons(&relaxed, Number::Float(f64::NEG_INFINITY), &path()).is_ok());
    }
}
