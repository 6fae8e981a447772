//! Mapping from native field types to semantic field types
//!
//! Resolution order, first match wins:
//!
//! 1. an explicit override for the field name;
//! 2. nullable wrappers are stripped;
//! 3. role-based names (`password_hash`, `email`, `body`, `description`);
//! 4. the native kind;
//! 5. fallback to [`SemanticType::String`].

use super::field::{NativeType, SemanticType};
use super::overrides::FieldOverrides;
use super::{EMAIL_FIELD, LONG_TEXT_FIELDS, PASSWORD_FIELD};

/// Detect the semantic type of a field
#[must_use]
pub fn detect_field_type(
    native: &NativeType,
    field_name: &str,
    overrides: &FieldOverrides,
) -> SemanticType {
    if let Some(explicit) = overrides.semantic_type(field_name) {
        return explicit;
    }

    let native = native.underlying();

    if let Some(by_name) = semantic_type_for_name(field_name) {
        return by_name;
    }

    match native {
        NativeType::Text => SemanticType::String,
        NativeType::Signed | NativeType::Unsigned => SemanticType::Integer,
        NativeType::Float => SemanticType::Float,
        NativeType::Bool => SemanticType::Boolean,
        NativeType::Timestamp => SemanticType::Timestamp,
        NativeType::Reference => SemanticType::Select,
        NativeType::Other(_) | NativeType::Optional(_) => SemanticType::String,
    }
}

/// Semantic type implied by a well-known field name
fn semantic_type_for_name(field_name: &str) -> Option<SemanticType> {
    if field_name == PASSWORD_FIELD {
        Some(SemanticType::Password)
    } else if field_name == EMAIL_FIELD {
        Some(SemanticType::Email)
    } else if LONG_TEXT_FIELDS.contains(&field_name) {
        Some(SemanticType::LongText)
    } else {
        None
    }
}
