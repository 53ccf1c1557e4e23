//! Integration tests for length, range, comparison, precision, pattern and
//! membership rules.

use strictbind::{model, ErrorKind, ValidationError, Validator};

fn validate<T: strictbind::Inspect>(value: &T) -> Result<(), ValidationError> {
    Validator::new().validate(value)
}

struct Profile {
    username: Option<String>,
    bio: Option<String>,
    age: Option<i32>,
    tags: Option<Vec<String>>,
}

model!(Profile {
    username: [min = 3, max = 10],
    bio: [max = 20, pass_empty],
    age: [min = 18, max = 120],
    tags: [max = 2],
});

fn profile() -> Profile {
    Profile {
        username: Some("ana".to_string()),
        bio: None,
        age: Some(30),
        tags: None,
    }
}

#[test]
fn test_valid_profile() {
    assert!(validate(&profile()).is_ok());
}

#[test]
fn test_text_length_counts_characters() {
    let mut p = profile();
    p.username = Some("ab".to_string());
    let err = validate(&p).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MinLength);
    assert_eq!(err.path.to_string(), "username");

    p.username = Some("ñandúñandú".to_string());
    assert!(validate(&p).is_ok());

    p.username = Some("abcdefghijk".to_string());
    assert_eq!(validate(&p).unwrap_err().kind, ErrorKind::MaxLength);
}

#[test]
fn test_numeric_range() {
    let mut p = profile();
    p.age = Some(17);
    let err = validate(&p).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MinValue);
    assert_eq!(err.got.as_deref(), Some("17"));

    p.age = Some(121);
    assert_eq!(validate(&p).unwrap_err().kind, ErrorKind::MaxValue);

    p.age = None;
    assert!(validate(&p).is_ok());
}

#[test]
fn test_sequence_length_counts_items() {
    let mut p = profile();
    p.tags = Some(vec!["a".into(), "b".into(), "c".into()]);
    let err = validate(&p).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MaxLength);
    assert!(err.message.contains("3"));
}

#[test]
fn test_pass_empty_keeps_length_checks_only() {
    let mut p = profile();
    p.bio = Some(String::new());
    assert!(validate(&p).is_ok());
}

struct Measurement {
    ratio: Option<f64>,
    step: Option<f64>,
    count: Option<u64>,
    raw: Option<f64>,
}

model!(Measurement {
    ratio: [gt = 0, lt = 1],
    step: [multiple_of = 0.25],
    count: [ge = 1, le = 5],
    raw: [allow_inf_nan],
});

fn measurement() -> Measurement {
    Measurement {
        ratio: Some(0.5),
        step: Some(1.75),
        count: Some(5),
        raw: Some(f64::INFINITY),
    }
}

#[test]
fn test_comparisons() {
    assert!(validate(&measurement()).is_ok());

    let mut m = measurement();
    m.ratio = Some(0.0);
    assert_eq!(validate(&m).unwrap_err().kind, ErrorKind::GreaterThan);

    m.ratio = Some(1.0);
    assert_eq!(validate(&m).unwrap_err().kind, ErrorKind::LessThan);

    let mut m = measurement();
    m.count = Some(0);
    assert_eq!(validate(&m).unwrap_err().kind, ErrorKind::GreaterThanEqual);

    m.count = Some(6);
    assert_eq!(validate(&m).unwrap_err().kind, ErrorKind::LessThanEqual);
}

#[test]
fn test_multiple_of() {
    let mut m = measurement();
    m.step = Some(1.3);
    let err = validate(&m).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotMultiple);
    assert_eq!(err.path.to_string(), "step");
}

#[test]
fn test_non_finite_floats() {
    let mut m = measurement();
    m.ratio = Some(f64::NAN);
    assert_eq!(validate(&m).unwrap_err().kind, ErrorKind::InvalidFloat);

    let mut m = measurement();
    m.step = Some(f64::NEG_INFINITY);
    assert_eq!(validate(&m).unwrap_err().kind, ErrorKind::InvalidFloat);

    // allow_inf_nan admits them
    let mut m = measurement();
    m.raw = Some(f64::NAN);
    assert!(validate(&m).is_ok());
}

struct Price {
    value: Option<f64>,
}

model!(Price {
    value: [max_digits = 5],
});

fn price(value: f64) -> Price {
    Price { value: Some(value) }
}

#[test]
fn test_decimal_precision() {
    struct Strict {
        value: Option<f64>,
    }
    model!(Strict {
        value: [max_digits = 6, decimal_places = 2],
    });
    assert!(validate(&Strict { value: Some(1234.56) }).is_ok());
    assert!(validate(&Strict { value: Some(9999.99) }).is_ok());

    let err = validate(&price(12345.6)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MaxDigits);
    assert_eq!(err.path.to_string(), "value");
    assert!(validate(&price(-123.45)).is_ok());
    assert_eq!(validate(&price(-123.456)).unwrap_err().kind, ErrorKind::MaxDigits);
    assert!(validate(&price(0.99)).is_ok());
}

#[test]
fn test_max_digits_ignores_trailing_zeros() {
    struct Rounded {
        value: Option<f64>,
    }
    model!(Rounded {
        value: [max_digits = 2],
    });

    assert!(validate(&Rounded { value: Some(100.0) }).is_ok());
    assert!(validate(&Rounded { value: Some(-2500.0) }).is_ok());

    let err = validate(&Rounded { value: Some(105.0) }).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MaxDigits);
    assert_eq!(
        err.message,
        "The field <value> must have at most 2 total digits (got 3)"
    );
}

#[test]
fn test_decimal_places() {
    struct Amount {
        value: Option<f64>,
    }
    model!(Amount {
        value: [decimal_places = 2],
    });

    let err = validate(&Amount { value: Some(123.456) }).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DecimalPlaces);
    assert!(validate(&Amount { value: Some(12.3000) }).is_ok());
}

struct Account {
    code: Option<String>,
    kind: Option<String>,
    level: Option<u8>,
    active: Option<bool>,
}

model!(Account {
    code: [regex = "^[a-zA-Z0-9]+$"],
    kind: [enum = "personal,business"],
    level: [enums = "1,2,3"],
    active: [enums = "true"],
});

fn account() -> Account {
    Account {
        code: Some("abc123".to_string()),
        kind: Some("personal".to_string()),
        level: Some(2),
        active: Some(true),
    }
}

#[test]
fn test_pattern() {
    assert!(validate(&account()).is_ok());

    let mut a = account();
    a.code = Some("abc-123".to_string());
    let err = validate(&a).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPattern);
    assert_eq!(err.path.to_string(), "code");
}

#[test]
fn test_membership() {
    let mut a = account();
    a.kind = Some("company".to_string());
    let err = validate(&a).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidEnum);
    assert_eq!(err.expected.as_deref(), Some("personal, business"));

    let mut a = account();
    a.level = Some(4);
    assert_eq!(validate(&a).unwrap_err().path.to_string(), "level");

    let mut a = account();
    a.active = Some(false);
    assert_eq!(validate(&a).unwrap_err().kind, ErrorKind::InvalidEnum);
}

#[test]
fn test_first_failing_rule_wins() {
    struct Code {
        value: Option<String>,
    }
    model!(Code {
        value: [min = 5, regex = "[0-9]+"],
    });

    // length is checked before the pattern
    let err = validate(&Code {
        value: Some("ab".to_string()),
    })
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MinLength);
}
