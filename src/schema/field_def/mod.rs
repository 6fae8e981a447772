//! Admin schema field definitions
//!
//! This module derives the display schema of a model from its declared fields:
//! native shapes, semantic type detection, overrides and descriptor extraction.

mod extract;
pub mod field;
pub mod mapping;
mod overrides;

pub use extract::{extract_fields, extract_model_fields, humanize};
pub use field::{FieldDescriptor, FieldShape, NativeType, SemanticType};
pub use mapping::detect_field_type;
pub use overrides::FieldOverrides;

/// Relationship cache field, never shown
pub const EDGES_FIELD: &str = "edges";
/// Private select helper field, never shown
pub const SELECT_VALUES_FIELD: &str = "select_values";
/// Fields skipped during extraction regardless of visibility
pub const INTERNAL_FIELDS: [&str; 2] = [EDGES_FIELD, SELECT_VALUES_FIELD];

/// Fields that are always readonly
pub const READONLY_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];
/// Field holding a password hash: password type, sensitive
pub const PASSWORD_FIELD: &str = "password_hash";
/// Field excluded from display and logs
pub const SENSITIVE_FIELD: &str = PASSWORD_FIELD;
/// Field rendered as an email input
pub const EMAIL_FIELD: &str = "email";
/// Fields rendered as long text
pub const LONG_TEXT_FIELDS: [&str; 2] = ["body", "description"];
