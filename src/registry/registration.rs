//! Registration intent for one model type
//!
//! A [`ModelRegistration`] carries what the caller wants to say about a model
//! beyond its declared fields: display names, field overrides, virtual fields
//! and hooks. The catalog turns it into a [`ModelConfig`](super::ModelConfig).

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::common::{EntityQuery, PreSaveHook, QueryModifier, SaveKind};
use crate::model::AdminModel;
use crate::schema::{FieldDescriptor, FieldOverrides, SemanticType};
use crate::value::FieldMap;

/// Registration of model type `T`
pub struct ModelRegistration<T: AdminModel> {
    pub(crate) handle: Option<String>,
    pub(crate) display_name: Option<String>,
    pub(crate) plural: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) overrides: FieldOverrides,
    pub(crate) extra_fields: Vec<FieldDescriptor>,
    pub(crate) pre_save: Option<Arc<dyn PreSaveHook>>,
    pub(crate) query_modifier: Option<Arc<dyn QueryModifier>>,
    _model: PhantomData<fn() -> T>,
}

impl<T: AdminModel> Default for ModelRegistration<T> {
    fn default() -> Self {
        Self {
            handle: None,
            display_name: None,
            plural: None,
            icon: None,
            overrides: FieldOverrides::new(),
            extra_fields: Vec::new(),
            pre_save: None,
            query_modifier: None,
            _model: PhantomData,
        }
    }
}

impl<T: AdminModel> fmt::Debug for ModelRegistration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistration")
            .field("entity", &T::ENTITY_NAME)
            .field("display_name", &self.display_name)
            .field("plural", &self.plural)
            .field("icon", &self.icon)
            .field("overrides", &self.overrides)
            .field("extra_fields", &self.extra_fields)
            .field("pre_save", &self.pre_save.is_some())
            .field("query_modifier", &self.query_modifier.is_some())
            .finish()
    }
}

impl<T: AdminModel> ModelRegistration<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the data-client handle, defaults to the entity name
    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// Display name, defaults to the entity name
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Plural display name, defaults to a naive pluralization
    #[must_use]
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Leave these fields out of forms and views
    #[must_use]
    pub fn hide_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.hidden.extend(names.into_iter().map(Into::into));
        self
    }

    /// Show these fields without allowing edits
    #[must_use]
    pub fn readonly_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.readonly.extend(names.into_iter().map(Into::into));
        self
    }

    /// Allow these fields to be left empty
    #[must_use]
    pub fn optional_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.optional.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.overrides.labels.insert(field.into(), label.into());
        self
    }

    /// Force the semantic type of a field
    #[must_use]
    pub fn with_field_type(mut self, field: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.overrides.types.insert(field.into(), semantic_type);
        self
    }

    /// Append a virtual form field after the derived ones
    #[must_use]
    pub fn with_extra_field(mut self, field: FieldDescriptor) -> Self {
        self.extra_fields.push(field);
        self
    }

    /// Run `hook` on submitted data before every create and update
    #[must_use]
    pub fn with_pre_save(mut self, hook: impl PreSaveHook + 'static) -> Self {
        self.pre_save = Some(Arc::new(hook));
        self
    }

    /// Closure form of [`with_pre_save`](Self::with_pre_save)
    #[must_use]
    pub fn with_pre_save_fn<F>(self, hook: F) -> Self
    where
        F: Fn(SaveKind, &mut FieldMap) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.with_pre_save(hook)
    }

    /// Run `modifier` on every read query before execution
    #[must_use]
    pub fn with_query_modifier(mut self, modifier: impl QueryModifier + 'static) -> Self {
        self.query_modifier = Some(Arc::new(modifier));
        self
    }

    /// Closure form of [`with_query_modifier`](Self::with_query_modifier)
    #[must_use]
    pub fn with_query_modifier_fn<F>(self, modifier: F) -> Self
    where
        F: Fn(&mut dyn EntityQuery) + Send + Sync + 'static,
    {
        self.with_query_modifier(modifier)
    }
}
