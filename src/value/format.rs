//! Display formatting of field values for read views
//!
//! The output is plain text. No escaping happens here; callers escape for
//! their own output context.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::FieldValue;

/// Default timestamp format, e.g. `Jan 2, 2006 3:04 PM`
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Format a value for display with the default timestamp format
#[must_use]
pub fn format_field_value(value: &FieldValue) -> String {
    format_field_value_with(value, DISPLAY_TIMESTAMP_FORMAT)
}

/// Format a value for display
///
/// * `Null`, a zero timestamp and an unset reference render as empty text
/// * booleans render as `✓` / `✗`
/// * references render as their email when they have one, else their label
/// * text is returned unchanged
#[must_use]
pub fn format_field_value_with(value: &FieldValue, timestamp_format: &str) -> String {
    match value {
        FieldValue::Null | FieldValue::Reference(None) => String::new(),
        FieldValue::Timestamp(ts) if is_zero_timestamp(ts) => String::new(),
        FieldValue::Timestamp(ts) => format_timestamp(ts, timestamp_format),
        FieldValue::Bool(true) => "✓".to_owned(),
        FieldValue::Bool(false) => "✗".to_owned(),
        FieldValue::Reference(Some(reference)) => reference
            .email
            .clone()
            .unwrap_or_else(|| reference.label.clone()),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Float(f) => f.to_string(),
    }
}

/// Whether a timestamp is the zero value a derived `Default` produces
#[must_use]
pub fn is_zero_timestamp(ts: &DateTime<Utc>) -> bool {
    *ts == DateTime::<Utc>::default()
}

fn format_timestamp(ts: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(format)).is_err() {
        // Invalid format string from configuration
        return ts.to_rfc3339();
    }
    out
}
