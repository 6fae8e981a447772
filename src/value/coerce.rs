//! Coercion of submitted values into a setter's declared type
//!
//! Form layers submit text; builders expect typed values. Coercion parses the
//! text according to the [`NativeType`] the builder declares for the setter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::FieldValue;
use crate::schema::NativeType;

/// Formats accepted for timestamps besides RFC 3339
const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// A value could not be converted to the requested type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert {found} to {expected}")]
pub struct ConversionError {
    pub expected: String,
    pub found: String,
}

impl ConversionError {
    fn new(expected: &NativeType, found: &FieldValue) -> Self {
        let found = match found {
            FieldValue::Text(text) => format!("\"{text}\""),
            other => format!("{other:?}"),
        };
        Self {
            expected: expected.to_string(),
            found,
        }
    }
}

impl FieldValue {
    /// Convert this value into the given native type
    ///
    /// `Null` passes through unchanged. Empty text becomes `Null` for nullable
    /// targets. References coerce to their identifier.
    pub fn coerce_to(self, target: &NativeType) -> Result<Self, ConversionError> {
        match (target, self) {
            (_, Self::Null) => Ok(Self::Null),
            (NativeType::Optional(_), Self::Text(text)) if text.trim().is_empty() => Ok(Self::Null),
            (NativeType::Optional(inner), value) => value.coerce_to(inner),

            (NativeType::Text | NativeType::Other(_), Self::Text(text)) => Ok(Self::Text(text)),
            (NativeType::Text | NativeType::Other(_), value) => Ok(Self::Text(plain_text(&value))),

            (NativeType::Signed, Self::Integer(n)) => Ok(Self::Integer(n)),
            (NativeType::Unsigned, Self::Integer(n)) if n >= 0 => Ok(Self::Integer(n)),
            (NativeType::Signed | NativeType::Unsigned, Self::Bool(flag)) => {
                Ok(Self::Integer(i64::from(flag)))
            }
            (NativeType::Signed | NativeType::Unsigned, Self::Text(ref text)) => {
                match text.trim().parse::<i64>() {
                    Ok(n) if n >= 0 || *target == NativeType::Signed => Ok(Self::Integer(n)),
                    _ => Err(ConversionError::new(target, &Self::Text(text.clone()))),
                }
            }

            (NativeType::Float, Self::Float(f)) => Ok(Self::Float(f)),
            #[allow(clippy::cast_precision_loss)]
            (NativeType::Float, Self::Integer(n)) => Ok(Self::Float(n as f64)),
            (NativeType::Float, Self::Text(ref text)) => text
                .trim()
                .parse::<f64>()
                .map(Self::Float)
                .map_err(|_| ConversionError::new(target, &Self::Text(text.clone()))),

            (NativeType::Bool, Self::Bool(flag)) => Ok(Self::Bool(flag)),
            (NativeType::Bool, Self::Integer(n)) => Ok(Self::Bool(n != 0)),
            (NativeType::Bool, Self::Text(ref text)) => parse_bool(text)
                .map(Self::Bool)
                .ok_or_else(|| ConversionError::new(target, &Self::Text(text.clone()))),

            (NativeType::Timestamp, Self::Timestamp(ts)) => Ok(Self::Timestamp(ts)),
            (NativeType::Timestamp, Self::Integer(secs)) => DateTime::from_timestamp(secs, 0)
                .map(Self::Timestamp)
                .ok_or_else(|| ConversionError::new(target, &Self::Integer(secs))),
            (NativeType::Timestamp, Self::Text(ref text)) => parse_timestamp(text)
                .map(Self::Timestamp)
                .ok_or_else(|| ConversionError::new(target, &Self::Text(text.clone()))),

            (NativeType::Reference, Self::Reference(Some(reference))) => Ok(Self::Integer(reference.id)),
            (NativeType::Reference, Self::Reference(None)) => Ok(Self::Null),
            (NativeType::Reference, Self::Integer(id)) => Ok(Self::Integer(id)),
            (NativeType::Reference, Self::Text(ref text)) => text
                .trim()
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| ConversionError::new(target, &Self::Text(text.clone()))),

            (target, value) => Err(ConversionError::new(target, &value)),
        }
    }
}

/// Plain textual form of a value, without display glyphs
fn plain_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Null | FieldValue::Reference(None) => String::new(),
        FieldValue::Bool(flag) => flag.to_string(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Float(f) => f.to_string(),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Timestamp(ts) => ts.to_rfc3339(),
        FieldValue::Reference(Some(reference)) => reference.id.to_string(),
    }
}

/// Parse a form checkbox or boolean literal
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" | "checked" => Some(true),
        "" | "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a timestamp in RFC 3339, an HTML `datetime-local` value or a date
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
}
