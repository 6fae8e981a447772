//! Setter-convention resolution
//!
//! Populates a mutation builder from a submitted field map. For each field the
//! builder's setter is looked up by the field name, then by the name with an
//! `_id` suffix, which covers relationship fields addressed by identifier.
//! Resolution is directional: `author_id` never falls back to `author`.
//!
//! Fields without a setter are skipped rather than rejected, so virtual fields
//! consumed by a pre-save hook never reach the builder.
//!
//! Fields are applied in declared descriptor order, then any remaining keys in
//! lexical order, so two fields targeting the same column always resolve the
//! same way.

use rustc_hash::FxHashSet;

use crate::common::MutationBuilder;
use crate::error::{AdminError, Result};
use crate::schema::field_def::LONG_TEXT_FIELDS;
use crate::schema::{FieldDescriptor, NativeType, SemanticType};
use crate::value::{FieldMap, FieldValue};

/// Suffix tried when a builder has no setter named after the field
pub const RELATION_ID_SUFFIX: &str = "_id";

/// Apply submitted values to a builder, returning how many were set
///
/// Fails only when a value cannot be converted to the setter's declared type.
pub fn apply_fields(
    builder: &mut dyn MutationBuilder,
    data: &FieldMap,
    fields: &[FieldDescriptor],
) -> Result<usize> {
    let declared: FxHashSet<&str> = fields.iter().map(|field| field.name.as_str()).collect();
    let ordered = fields
        .iter()
        .filter_map(|field| data.get_key_value(field.name.as_str()))
        .chain(
            data.iter()
                .filter(|(name, _)| !declared.contains(name.as_str())),
        );

    let mut applied = 0;
    for (name, value) in ordered {
        let descriptor = fields.iter().find(|field| field.name == *name);
        if should_skip(name, value, descriptor) {
            continue;
        }

        let Some((setter, native)) = resolve_setter(builder, name) else {
            log::debug!("No setter for field `{name}`, skipping");
            continue;
        };

        let value = value
            .clone()
            .coerce_to(&native)
            .map_err(|err| AdminError::Validation {
                field: name.clone(),
                message: err.to_string(),
            })?;

        if descriptor.is_some_and(|field| field.sensitive) {
            log::debug!("Setting {setter} = <redacted>");
        } else {
            log::debug!("Setting {setter} = {value:?}");
        }
        builder.set(&setter, value);
        applied += 1;
    }

    Ok(applied)
}

/// Find the setter for a field: `name`, then `name_id`
#[must_use]
pub fn resolve_setter(builder: &dyn MutationBuilder, name: &str) -> Option<(String, NativeType)> {
    if let Some(native) = builder.setter(name) {
        return Some((name.to_owned(), native));
    }
    let relation = format!("{name}{RELATION_ID_SUFFIX}");
    builder.setter(&relation).map(|native| (relation, native))
}

/// Null values are never applied. Empty text is skipped except for long-text
/// fields, where it clears the value.
fn should_skip(name: &str, value: &FieldValue, descriptor: Option<&FieldDescriptor>) -> bool {
    if value.is_null() {
        return true;
    }
    if !value.is_empty_text() {
        return false;
    }
    let long_text = descriptor.map_or_else(
        || LONG_TEXT_FIELDS.contains(&name),
        |field| field.semantic_type == SemanticType::LongText,
    );
    !long_text
}
