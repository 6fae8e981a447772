//! Field definitions for the admin schema
//!
//! This module defines the native shape of a model field as reported by the
//! derive macro, the closed set of semantic types that drive form and display
//! rendering, and the field descriptor the registry hands to callers.

use serde::Serialize;
use std::fmt;

/// Native shape of a model field
///
/// Produced at compile time by `#[derive(AdminModel)]`. Nullable fields are
/// wrapped in [`NativeType::Optional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeType {
    /// Any string type
    Text,
    /// Signed integer of any width
    Signed,
    /// Unsigned integer of any width
    Unsigned,
    /// Floating point value
    Float,
    /// Boolean value
    Bool,
    /// Timestamp-shaped structure (`DateTime`, `NaiveDateTime`, `NaiveDate`)
    Timestamp,
    /// Reference to a related record
    Reference,
    /// Anything else, carrying the type's name
    Other(&'static str),
    /// Nullable wrapper around another type
    Optional(&'static NativeType),
}

impl NativeType {
    /// Whether this type is a nullable wrapper
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Strip every nullable wrapper and return the underlying type
    #[must_use]
    pub fn underlying(&self) -> &Self {
        let mut current = self;
        while let Self::Optional(inner) = current {
            current = *inner;
        }
        current
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Signed => write!(f, "integer"),
            Self::Unsigned => write!(f, "unsigned integer"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "boolean"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Reference => write!(f, "record reference"),
            Self::Other(name) => write!(f, "{name}"),
            Self::Optional(inner) => write!(f, "optional {inner}"),
        }
    }
}

/// Compile-time description of one declared field of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldShape {
    /// Field identifier as declared
    pub name: &'static str,
    /// Native type of the field
    pub native: NativeType,
    /// Whether the field is `pub`
    pub exported: bool,
}

/// Semantic type of a field, used to drive form and display rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    String,
    LongText,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Password,
    Email,
    Select,
}

impl SemanticType {
    /// Get the snake-case name of this type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::LongText => "long_text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Password => "password",
            Self::Email => "email",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for one field of a registered model
///
/// Computed once at registration and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field identifier as declared
    pub name: String,
    /// Human display label
    pub label: String,
    /// Semantic type of the field
    pub semantic_type: SemanticType,
    /// Whether a value must be submitted
    pub required: bool,
    /// Whether the field is shown but not editable
    pub readonly: bool,
    /// Whether the field is left out of forms and views
    pub hidden: bool,
    /// Whether the value must never be displayed or logged
    pub sensitive: bool,
    /// Optional help text
    pub help: Option<String>,
}

impl FieldDescriptor {
    /// Create a descriptor for a virtual field with an auto-derived label
    ///
    /// Virtual fields exist only in forms; their values are typically consumed
    /// by a pre-save hook before anything reaches the data client.
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        let name = name.into();
        Self {
            label: super::humanize(&name),
            name,
            semantic_type,
            required: false,
            readonly: false,
            hidden: false,
            sensitive: false,
            help: None,
        }
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the help text
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Mark the field as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as sensitive
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Clear `required` wherever it contradicts the other flags
    ///
    /// Readonly, hidden and boolean fields are never required.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.readonly || self.hidden || self.semantic_type == SemanticType::Boolean {
            self.required = false;
        }
        self
    }

    /// Whether the field belongs in list and detail views
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        !self.hidden && !self.sensitive
    }
}
