//! Integration tests for the `format` rule.

use strictbind::{model, AnnotationError, ErrorKind, Format, ValidationError, Validator};

struct Contact {
    email: Option<String>,
    website: Option<String>,
    birthday: Option<String>,
    phone: Option<String>,
    msisdn: Option<String>,
    nuit: Option<String>,
}

model!(Contact {
    email: [format = "email"],
    website: [format = "url"],
    birthday: [format = "date"],
    phone: [format = "phone"],
    msisdn: [format = "mz-msisdn"],
    nuit: [format = "mz-nuit"],
});

fn contact() -> Contact {
    Contact {
        email: Some("test@example.com".to_string()),
        website: Some("https://example.com/about".to_string()),
        birthday: Some("1990-02-28".to_string()),
        phone: Some("+14155552671".to_string()),
        msisdn: Some("258841234567".to_string()),
        nuit: Some("123456789".to_string()),
    }
}

fn validate(contact: &Contact) -> Result<(), ValidationError> {
    Validator::new().validate(contact)
}

#[test]
fn test_valid_formats() {
    assert!(validate(&contact()).is_ok());
}

#[test]
fn test_invalid_email() {
    let mut c = contact();
    c.email = Some("invalid-email".to_string());

    let err = validate(&c).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidFormat(Format::Email));
    assert_eq!(err.code(), "INVALID_EMAIL");
    assert_eq!(err.path.to_string(), "email");
}

#[test]
fn test_invalid_url_and_date() {
    let mut c = contact();
    c.website = Some("example.com".to_string());
    assert_eq!(validate(&c).unwrap_err().code(), "INVALID_URL");

    let mut c = contact();
    c.birthday = Some("1990-02-30".to_string());
    assert_eq!(validate(&c).unwrap_err().code(), "INVALID_DATE");
}

#[test]
fn test_locale_formats() {
    let mut c = contact();
    c.msisdn = Some("841234567".to_string());
    let err = validate(&c).unwrap_err();
    assert_eq!(err.code(), "INVALID_MZ_MSISDN");

    let mut c = contact();
    c.nuit = Some("12345678".to_string());
    assert_eq!(validate(&c).unwrap_err().code(), "INVALID_MZ_NUIT");
}

#[test]
fn test_absent_values_skip_formats() {
    let c = Contact {
        email: None,
        website: None,
        birthday: None,
        phone: None,
        msisdn: None,
        nuit: None,
    };
    assert!(validate(&c).is_ok());
}

#[test]
fn test_pass_empty_skips_format() {
    struct Optional {
        email: Option<String>,
    }
    model!(Optional {
        email: [format = "email", pass_empty],
    });

    let value = Optional {
        email: Some(String::new()),
    };
    assert!(Validator::new().validate(&value).is_ok());
}

#[test]
fn test_unknown_format_is_an_annotation_error() {
    struct Weird {
        code: String,
    }
    model!(Weird {
        code: [format = "isbn"],
    });

    let err = Validator::new().register_model::<Weird>().unwrap_err();
    assert!(matches!(err, AnnotationError::UnknownFormat { ref format, .. } if format == "isbn"));
}
