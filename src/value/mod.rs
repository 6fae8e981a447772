//! Caller-agnostic field values
//!
//! Records, form submissions and display all speak in [`FieldValue`]s, so the
//! dispatcher never needs to know the concrete types behind an entity.

mod coerce;
mod format;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::model::{Record, RecordId};

pub use coerce::ConversionError;
pub use format::{
    DISPLAY_TIMESTAMP_FORMAT, format_field_value, format_field_value_with, is_zero_timestamp,
};

/// Map of field name to submitted value
///
/// Ordered so that iteration is deterministic.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A single field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Related record, `None` when the relation is unset
    Reference(Option<Reference>),
}

impl FieldValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the text if this is a text value
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this is a text value that is empty
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        self.as_text().is_some_and(str::is_empty)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A reference to a related record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub id: RecordId,
    pub label: String,
    pub email: Option<String>,
}

impl Reference {
    /// Build a reference from a related record
    pub fn of<R: Record + ?Sized>(record: &R) -> Self {
        let email = match record.field_value("email") {
            Some(FieldValue::Text(email)) if !email.is_empty() => Some(email),
            _ => None,
        };
        Self {
            id: record.record_id(),
            label: record.display_label(),
            email,
        }
    }
}

/// Conversion of a model field into a [`FieldValue`]
///
/// Used by the code generated for `#[derive(AdminModel)]`.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_ref().map_or(FieldValue::Null, ToFieldValue::to_field_value)
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Box<T> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Arc<T> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Rc<T> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<B: ToFieldValue + ToOwned + ?Sized> ToFieldValue for Cow<'_, B> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl ToFieldValue for FieldValue {
    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_owned())
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

impl ToFieldValue for f32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(*self as i64)
                }
            }
        )*
    };
}

// Values outside the i64 range degrade to floats
macro_rules! impl_checked {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                #[allow(clippy::cast_precision_loss)]
                fn to_field_value(&self) -> FieldValue {
                    i64::try_from(*self)
                        .map_or_else(|_| FieldValue::Float(*self as f64), FieldValue::Integer)
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_checked!(u8, u16, u32, u64, usize, i128, u128);

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Timestamp(*self)
    }
}

impl ToFieldValue for NaiveDateTime {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Timestamp(self.and_utc())
    }
}

impl ToFieldValue for NaiveDate {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Timestamp(self.and_time(NaiveTime::MIN).and_utc())
    }
}

impl ToFieldValue for SystemTime {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Timestamp(DateTime::<Utc>::from(*self))
    }
}

impl ToFieldValue for Reference {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Reference(Some(self.clone()))
    }
}
