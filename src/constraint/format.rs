//! Named text formats.

use std::fmt::{self, Display};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:https?|ftp)://[^\s/$.?#][^\s]*$").expect("url regex"));

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid regex")
});

static CREDIT_CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}[- ]?\d{4}[- ]?\d{4}[- ]?\d{4}$").expect("credit card regex")
});

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("postal code regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").expect("phone regex"));

static SSN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$").expect("ssn regex"));

static CREDIT_CARD_EXPIRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/(\d{2}|\d{4})$").expect("credit card expiry regex")
});

static LATITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(90(\.0+)?|[1-8]?\d(\.\d+)?)$").expect("latitude regex")
});

static LONGITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(180(\.0+)?|(1[0-7]\d|[1-9]?\d)(\.\d+)?)$").expect("longitude regex")
});

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color regex")
});

static MAC_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("mac address regex")
});

static MZ_MSISDN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^258\d{9}$").expect("mz msisdn regex"));

static MZ_NUIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{9}$").expect("mz nuit regex"));

/// A named text format usable with the `format` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Email,
    Url,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Wall-clock time, `HH:MM:SS`.
    Time,
    Uuid,
    /// IPv4 or IPv6 address.
    Ip,
    CreditCard,
    PostalCode,
    /// International number with a leading `+`.
    Phone,
    Ssn,
    /// `MM/YY` or `MM/YYYY`.
    CreditCardExpiry,
    Latitude,
    Longitude,
    HexColor,
    MacAddress,
    /// Mozambican mobile number: `258` followed by nine digits.
    MzMsisdn,
    /// Mozambican tax number: nine digits.
    MzNuit,
}

impl Format {
    /// All formats, in table order.
    pub const ALL: [Format; 17] = [
        Format::Email,
        Format::Url,
        Format::Date,
        Format::Time,
        Format::Uuid,
        Format::Ip,
        Format::CreditCard,
        Format::PostalCode,
        Format::Phone,
        Format::Ssn,
        Format::CreditCardExpiry,
        Format::Latitude,
        Format::Longitude,
        Format::HexColor,
        Format::MacAddress,
        Format::MzMsisdn,
        Format::MzNuit,
    ];

    /// Returns the name used in the `format` rule.
    pub fn name(self) -> &'static str {
        match self {
            Format::Email => "email",
            Format::Url => "url",
            Format::Date => "date",
            Format::Time => "time",
            Format::Uuid => "uuid",
            Format::Ip => "ip",
            Format::CreditCard => "credit_card",
            Format::PostalCode => "postal_code",
            Format::Phone => "phone",
            Format::Ssn => "ssn",
            Format::CreditCardExpiry => "credit_card_expiry",
            Format::Latitude => "latitude",
            Format::Longitude => "longitude",
            Format::HexColor => "hex_color",
            Format::MacAddress => "mac_address",
            Format::MzMsisdn => "mz-msisdn",
            Format::MzNuit => "mz-nuit",
        }
    }

    /// Returns true if `value` is well-formed for this format.
    pub fn matches(self, value: &str) -> bool {
        let regex: &Regex = match self {
            Format::Date => return NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            Format::Time => return NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok(),
            Format::Ip => return value.parse::<IpAddr>().is_ok(),
            Format::Email => &EMAIL_RE,
            Format::Url => &URL_RE,
            Format::Uuid => &UUID_RE,
            Format::CreditCard => &CREDIT_CARD_RE,
            Format::PostalCode => &POSTAL_CODE_RE,
            Format::Phone => &PHONE_RE,
            Format::Ssn => &SSN_RE,
            Format::CreditCardExpiry => &CREDIT_CARD_EXPIRY_RE,
            Format::Latitude => &LATITUDE_RE,
            Format::Longitude => &LONGITUDE_RE,
            Format::HexColor => &HEX_COLOR_RE,
            Format::MacAddress => &MAC_ADDRESS_RE,
            Format::MzMsisdn => &MZ_MSISDN_RE,
            Format::MzNuit => &MZ_NUIT_RE,
        };
        regex.is_match(value)
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| UnknownFormat(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        let cases = [
            ("email", "test@example.com", true),
            ("email", "invalid-email", false),
            ("url", "http://example.com", true),
            ("url", "invalid-url", false),
            ("date", "2024-02-29", true),
            ("date", "2023-02-29", false),
            ("date", "invalid-date", false),
            ("time", "12:34:56", true),
            ("time", "25:00:00", false),
            ("uuid", "123e4567-e89b-12d3-a456-426614174000", true),
            ("uuid", "invalid-uuid", false),
            ("ip", "192.168.1.1", true),
            ("ip", "::1", true),
            ("ip", "invalid-ip", false),
            ("credit_card", "1234-5678-9012-3456", true),
            ("credit_card", "invalid-credit-card", false),
            ("postal_code", "12345", true),
            ("postal_code", "invalid-postal-code", false),
            ("phone", "+1234567890", true),
            ("phone", "1234567890", false),
            ("ssn", "123-45-6789", true),
            ("ssn", "invalid-ssn", false),
            ("credit_card_expiry", "02/2024", true),
            ("credit_card_expiry", "invalid-expiry-date", false),
            ("latitude", "45.678", true),
            ("latitude", "91", false),
            ("latitude", "invalid-latitude", false),
            ("longitude", "-123.456", true),
            ("longitude", "invalid-longitude", false),
            ("hex_color", "#FFFFFF", true),
            ("hex_color", "invalid-hex-color", false),
            ("mac_address", "00:0a:95:9d:68:16", true),
            ("mac_address", "invalid-mac-address", false),
            ("mz-msisdn", "258123456789", true),
            ("mz-msisdn", "123456789", false),
            ("mz-nuit", "123456789", true),
            ("mz-nuit", "invalid-nuit", false),
        ];

        for (name, input, expected) in cases {
            let format: Format = name.parse().unwrap();
            assert_eq!(
                format.matches(input),
                expected,
                "format {} with input {}",
                name,
                input
            );
        }
    }

    #[test]
    fn test_names_round_trip() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn test_unknown_format_name() {
        assert_eq!(
            "zip".parse::<Format>(),
            Err(UnknownFormat("zip".to_string()))
        );
    }
}
