//! The decode stage of `bind` and its error classification.
//!
//! Decoder failures are turned into [`ValidationError`]s: malformed input is
//! `SYNTAX`, a value of the wrong type is `TYPE_MISMATCH`, an unparsable
//! [`Timestamp`] is `INVALID_TIME`. The decoder only reports a line and a
//! column, so the field path is recovered by rescanning the input up to that
//! position.

use std::any::Any;
use std::fmt;
use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::error::Category;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, ValidationError};
use crate::path::FieldPath;
use crate::schema::{Inspect, Kind};

/// Layout name reported for unparsable timestamps.
pub const TIME_LAYOUT: &str = "RFC 3339";

const INVALID_TIME_PREFIX: &str = "invalid time <";

/// A UTC instant that decodes from RFC 3339 text.
///
/// Decoding failures carry the offending literal so that `bind` can report
/// them as `INVALID_TIME` rather than a type mismatch. The default value is
/// the zero instant, which validation treats as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl Deref for Timestamp {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Timestamp(time)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|time| Timestamp(time.with_timezone(&Utc)))
            .map_err(|_| {
                de::Error::custom(format!(
                    "{}{}>, expected format `{}`",
                    INVALID_TIME_PREFIX, raw, TIME_LAYOUT
                ))
            })
    }
}

impl Inspect for Timestamp {
    fn kind(&self) -> Kind<'_> {
        Kind::Time(self.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Decodes `bytes` into a typed instance.
pub fn decode_typed<M: DeserializeOwned>(bytes: &[u8]) -> Result<M, ValidationError> {
    serde_json::from_slice(bytes).map_err(|err| classify(&err, bytes))
}

/// Decodes `bytes` into a generic tree, which must be a non-empty object.
pub fn decode_tree(bytes: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    let invalid = || {
        ValidationError::new(
            ErrorKind::InvalidJson,
            FieldPath::root(),
            "The given data is not a valid JSON object",
        )
    };

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) if map.is_empty() => Err(ValidationError::new(
            ErrorKind::EmptyJson,
            FieldPath::root(),
            "The given json data is empty",
        )),
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => Err(invalid()),
    }
}

/// Classifies a decoder error raised while reading `bytes`.
pub fn classify(err: &serde_json::Error, bytes: &[u8]) -> ValidationError {
    match err.classify() {
        Category::Syntax | Category::Eof => {
            ValidationError::new(ErrorKind::Syntax, FieldPath::root(), err.to_string())
        }
        Category::Io => ValidationError::new(ErrorKind::InvalidJson, FieldPath::root(), err.to_string()),
        Category::Data => classify_data(err, bytes),
    }
}

fn classify_data(err: &serde_json::Error, bytes: &[u8]) -> ValidationError {
    let rendered = err.to_string();
    let detail = strip_position(&rendered);
    let frames = locate(bytes, err.line(), err.column());

    if let Some(rest) = detail.strip_prefix(INVALID_TIME_PREFIX) {
        let literal = rest.split_once('>').map_or(rest, |(literal, _)| literal);
        return ValidationError::new(
            ErrorKind::InvalidTime,
            field_path(&frames),
            format!("Invalid time <{}>, expected format `{}`", literal, TIME_LAYOUT),
        )
        .with_got(literal)
        .with_expected(TIME_LAYOUT);
    }

    if let Some(field) = backticked(detail, "missing field `") {
        let path = object_path(&frames).push_field(field);
        return ValidationError::new(
            ErrorKind::RequiredField,
            path.clone(),
            format!("The field <{}> is required", path),
        );
    }

    if let Some(field) = backticked(detail, "unknown field `") {
        let path = object_path(&frames).push_field(field);
        return ValidationError::new(
            ErrorKind::InvalidField,
            path.clone(),
            format!("Invalid field <{}>", path),
        );
    }

    let path = field_path(&frames);
    let mut error = ValidationError::new(
        ErrorKind::TypeMismatch,
        path.clone(),
        format!("The field <{}> was given an invalid type: {}", path, detail),
    );
    if let Some((got, expected)) = detail
        .strip_prefix("invalid type: ")
        .and_then(|rest| rest.split_once(", expected "))
    {
        error = error.with_got(got).with_expected(expected);
    }
    error
}

/// Drops the " at line L column C" suffix the decoder appends.
fn strip_position(rendered: &str) -> &str {
    rendered
        .rsplit_once(" at line ")
        .map_or(rendered, |(detail, _)| detail)
}

fn backticked<'a>(detail: &'a str, prefix: &str) -> Option<&'a str> {
    detail.strip_prefix(prefix)?.split_once('`').map(|(name, _)| name)
}

/// One open container at the error position.
#[derive(Debug, Clone, PartialEq)]
enum Frame {
    Object { key: Option<String>, expecting_key: bool },
    Array,
}

/// Rescans `bytes` up to the reported position and returns the containers
/// still open there, outermost first.
///
/// The decoder reports the column one past the byte it was looking at, so
/// that byte is excluded.
fn locate(bytes: &[u8], line: usize, column: usize) -> Vec<Frame> {
    let end = offset_of(bytes, line, column).saturating_sub(1).min(bytes.len());
    let mut frames = Vec::new();
    let mut i = 0;

    while i < end {
        match bytes[i] {
            b'{' => frames.push(Frame::Object {
                key: None,
                expecting_key: true,
            }),
            b'[' => frames.push(Frame::Array),
            b'}' | b']' => {
                frames.pop();
            }
            b',' => {
                if let Some(Frame::Object { expecting_key, .. }) = frames.last_mut() {
                    *expecting_key = true;
                }
            }
            b'"' => {
                let (text, next) = read_string(bytes, i + 1, end);
                if let Some(Frame::Object { key, expecting_key }) = frames.last_mut() {
                    if *expecting_key {
                        *key = Some(text);
                        *expecting_key = false;
                    }
                }
                i = next;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    frames
}

fn offset_of(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        bytes
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == b'\n')
            .nth(line - 2)
            .map_or(bytes.len(), |(index, _)| index + 1)
    };
    line_start + column
}

/// Reads a string body starting after its opening quote. Escapes are kept
/// as written.
fn read_string(bytes: &[u8], start: usize, end: usize) -> (String, usize) {
    let mut i = start;
    while i < end {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => {
                let text = String::from_utf8_lossy(&bytes[start..i]).into_owned();
                return (text, i + 1);
            }
            _ => i += 1,
        }
    }
    let text = String::from_utf8_lossy(&bytes[start..end.min(bytes.len()).max(start)]).into_owned();
    (text, end)
}

/// The path of the value being read: every object's current key.
fn field_path(frames: &[Frame]) -> FieldPath {
    frames
        .iter()
        .filter_map(|frame| match frame {
            Frame::Object { key, .. } => key.as_deref(),
            Frame::Array => None,
        })
        .fold(FieldPath::root(), |path, key| path.push_field(key))
}

/// The path of the innermost open object itself.
fn object_path(frames: &[Frame]) -> FieldPath {
    let innermost = frames
        .iter()
        .rposition(|frame| matches!(frame, Frame::Object { .. }))
        .unwrap_or(0);
    field_path(&frames[..innermost])
}
