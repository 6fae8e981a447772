//! Model and record traits
//!
//! [`AdminModel`] is the compile-time description of an entity type and is
//! normally implemented with `#[derive(AdminModel)]`. [`Record`] is the
//! type-erased view of one stored record that the dispatcher hands back to
//! callers.

use std::fmt::Debug;
use std::sync::Arc;

use crate::schema::FieldShape;
use crate::value::FieldValue;

/// Record identifier
pub type RecordId = i64;

/// Type-erased record returned by the dispatcher
pub type RecordRef = Box<dyn Record>;

/// Read access to one stored record
pub trait Record: Debug + Send + Sync {
    /// Identifier of this record
    fn record_id(&self) -> RecordId;

    /// Current value of a field, or `None` if the record has no such field
    fn field_value(&self, name: &str) -> Option<FieldValue>;

    /// Short human label for this record
    ///
    /// Uses the first text value among `name`, `title` and `email`, falling
    /// back to `#<id>`.
    fn display_label(&self) -> String {
        ["name", "title", "email"]
            .into_iter()
            .find_map(|field| match self.field_value(field) {
                Some(FieldValue::Text(text)) if !text.is_empty() => Some(text),
                _ => None,
            })
            .unwrap_or_else(|| format!("#{}", self.record_id()))
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn record_id(&self) -> RecordId {
        (**self).record_id()
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        (**self).field_value(name)
    }

    fn display_label(&self) -> String {
        (**self).display_label()
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn record_id(&self) -> RecordId {
        (**self).record_id()
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        (**self).field_value(name)
    }

    fn display_label(&self) -> String {
        (**self).display_label()
    }
}

/// Compile-time description of an entity type
pub trait AdminModel: Record + 'static {
    /// Entity name, used as the registry key and to address the data client
    const ENTITY_NAME: &'static str;

    /// Every declared field, in declaration order
    const FIELDS: &'static [FieldShape];
}

/// Conversion of an identifier field into a [`RecordId`]
pub trait RecordKey {
    fn record_key(&self) -> RecordId;
}

macro_rules! impl_record_key {
    ($($ty:ty),*) => {
        $(
            impl RecordKey for $ty {
                #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
                fn record_key(&self) -> RecordId {
                    *self as RecordId
                }
            }
        )*
    };
}

impl_record_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
