//! Schema derivation for registered models.

pub mod field_def;

pub use field_def::{
    FieldDescriptor, FieldOverrides, FieldShape, NativeType, SemanticType, detect_field_type,
    extract_fields, extract_model_fields, humanize,
};
