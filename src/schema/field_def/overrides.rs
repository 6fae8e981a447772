//! Per-registration overrides of the auto-derived schema

use rustc_hash::{FxHashMap, FxHashSet};

use super::field::SemanticType;

/// Caller-supplied customisations that take precedence over derived schema
#[derive(Debug, Clone, Default)]
pub struct FieldOverrides {
    /// Explicit labels by field name
    pub labels: FxHashMap<String, String>,
    /// Explicit semantic types by field name
    pub types: FxHashMap<String, SemanticType>,
    /// Fields left out of forms and views
    pub hidden: FxHashSet<String>,
    /// Fields shown but not editable
    pub readonly: FxHashSet<String>,
    /// Fields that may be left empty even if their type is not nullable
    pub optional: FxHashSet<String>,
}

impl FieldOverrides {
    /// Create an empty override bundle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit label for a field, if any
    #[must_use]
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    /// Explicit semantic type for a field, if any
    #[must_use]
    pub fn semantic_type(&self, name: &str) -> Option<SemanticType> {
        self.types.get(name).copied()
    }

    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }

    #[must_use]
    pub fn is_readonly(&self, name: &str) -> bool {
        self.readonly.contains(name)
    }

    #[must_use]
    pub fn is_optional(&self, name: &str) -> bool {
        self.optional.contains(name)
    }
}
