//! Field descriptor extraction
//!
//! Turns the compile-time field shapes of a model into the display metadata
//! used by forms and read views.

use itertools::Itertools;

use super::field::{FieldDescriptor, FieldShape, SemanticType};
use super::mapping::detect_field_type;
use super::overrides::FieldOverrides;
use super::{INTERNAL_FIELDS, READONLY_FIELDS, SENSITIVE_FIELD};
use crate::model::AdminModel;

/// Extract field descriptors for a model type
#[must_use]
pub fn extract_model_fields<T: AdminModel>(overrides: &FieldOverrides) -> Vec<FieldDescriptor> {
    extract_fields(T::FIELDS, overrides)
}

/// Extract field descriptors from declared field shapes
///
/// Fields are returned in declaration order. Non-`pub` fields and the internal
/// `edges` / `select_values` helpers are skipped. This never fails: unknown
/// native types fall back to plain strings.
#[must_use]
pub fn extract_fields(shapes: &[FieldShape], overrides: &FieldOverrides) -> Vec<FieldDescriptor> {
    shapes
        .iter()
        .filter(|shape| shape.exported && !INTERNAL_FIELDS.contains(&shape.name))
        .map(|shape| describe_field(shape, overrides))
        .collect()
}

fn describe_field(shape: &FieldShape, overrides: &FieldOverrides) -> FieldDescriptor {
    let name = shape.name;
    let hidden = overrides.is_hidden(name);
    let readonly = overrides.is_readonly(name) || READONLY_FIELDS.contains(&name);
    let semantic_type = detect_field_type(&shape.native, name, overrides);
    let required = !readonly
        && !hidden
        && semantic_type != SemanticType::Boolean
        && !overrides.is_optional(name)
        && !shape.native.is_nullable();

    FieldDescriptor {
        name: name.to_owned(),
        label: overrides
            .label(name)
            .map_or_else(|| humanize(name), str::to_owned),
        semantic_type,
        required,
        readonly,
        hidden,
        sensitive: name == SENSITIVE_FIELD,
        help: None,
    }
}

/// Derive a human label from a field identifier
///
/// `snake_case` names become title-cased words, with `id` spelled `ID`.
/// `CamelCase` names get a space before each capital that follows a lowercase
/// letter or digit.
#[must_use]
pub fn humanize(name: &str) -> String {
    if name.contains('_') || !name.chars().any(char::is_uppercase) {
        return name
            .split('_')
            .filter(|word| !word.is_empty())
            .map(title_word)
            .join(" ");
    }

    let mut label = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            label.push(' ');
        }
        label.push(c);
        prev = Some(c);
    }
    label
}

fn title_word(word: &str) -> String {
    if word.eq_ignore_ascii_case("id") {
        return "ID".to_owned();
    }
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
