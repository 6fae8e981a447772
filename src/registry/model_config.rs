//! Derived per-model configuration
//!
//! A [`ModelConfig`] is built once by the catalog and never changes. It holds
//! the field descriptors of the model and routes every operation through the
//! generic [`Dispatcher`], running the registration's pre-save hook first for
//! create and update.

use std::fmt;
use std::sync::Arc;

use crate::common::{Context, PreSaveHook, SaveKind};
use crate::dispatch::Dispatcher;
use crate::error::{AdminError, Result};
use crate::model::{Record, RecordId, RecordRef};
use crate::schema::FieldDescriptor;
use crate::value::{FieldMap, FieldValue, format_field_value_with};

use super::pagination::Page;

/// Registry-owned configuration of one registered model
pub struct ModelConfig {
    pub(crate) name: String,
    pub(crate) display_name: String,
    pub(crate) plural: String,
    pub(crate) icon: Option<String>,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) pre_save: Option<Arc<dyn PreSaveHook>>,
    pub(crate) timestamp_format: String,
    pub(crate) default_per_page: usize,
    pub(crate) max_per_page: usize,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("plural", &self.plural)
            .field("icon", &self.icon)
            .field("fields", &self.fields.len())
            .field("dispatcher", &self.dispatcher)
            .field("pre_save", &self.pre_save.is_some())
            .finish_non_exhaustive()
    }
}

impl ModelConfig {
    /// Entity name, the model's type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn plural(&self) -> &str {
        &self.plural
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// All field descriptors, derived fields first, then virtual fields
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field descriptor by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields shown as list and detail columns
    pub fn list_columns(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.is_displayed())
    }

    /// Fetch every record
    pub async fn list(&self, ctx: &Context) -> Result<Vec<RecordRef>> {
        self.dispatcher.list_all(ctx).await
    }

    /// Fetch at most `limit` records after skipping `offset`
    pub async fn list_paginated(
        &self,
        ctx: &Context,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RecordRef>> {
        self.dispatcher.list_paginated(ctx, limit, offset).await
    }

    pub async fn count(&self, ctx: &Context) -> Result<usize> {
        self.dispatcher.count(ctx).await
    }

    /// Fetch one record
    pub async fn get(&self, ctx: &Context, id: RecordId) -> Result<RecordRef> {
        self.dispatcher.get_by_id(ctx, id).await
    }

    /// Create a record from submitted data
    ///
    /// The pre-save hook runs first and may rewrite `data`; its failure aborts
    /// the create before the data client is touched.
    pub async fn create(&self, ctx: &Context, mut data: FieldMap) -> Result<RecordRef> {
        self.run_pre_save(ctx, SaveKind::Create, &mut data).await?;
        self.dispatcher.create(ctx, &data, &self.fields).await
    }

    /// Update a record from submitted data
    pub async fn update(&self, ctx: &Context, id: RecordId, mut data: FieldMap) -> Result<RecordRef> {
        self.run_pre_save(ctx, SaveKind::Update(id), &mut data).await?;
        self.dispatcher.update(ctx, id, &data, &self.fields).await
    }

    pub async fn delete(&self, ctx: &Context, id: RecordId) -> Result<()> {
        self.dispatcher.delete(ctx, id).await
    }

    /// Fetch one page of records
    ///
    /// `page` is one-based; zero is treated as the first page. A page past the
    /// end yields no items. `per_page`
    /// defaults to the configured page size and is clamped to
    /// `1..=max_per_page`.
    pub async fn page(&self, ctx: &Context, page: usize, per_page: Option<usize>) -> Result<Page> {
        let page = page.max(1);
        let per_page = per_page
            .unwrap_or(self.default_per_page)
            .clamp(1, self.max_per_page.max(1));
        let total = self.count(ctx).await?;
        let items = self
            .list_paginated(ctx, per_page, (page - 1).saturating_mul(per_page))
            .await?;
        Ok(Page {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Check that every required field has a non-empty value
    ///
    /// Reports the first missing field in declaration order.
    pub fn validate(&self, data: &FieldMap) -> Result<()> {
        let missing = self.fields.iter().find(|field| {
            field.required
                && data
                    .get(&field.name)
                    .is_none_or(|value| value.is_null() || value.is_empty_text())
        });
        match missing {
            Some(field) => Err(AdminError::Validation {
                field: field.name.clone(),
                message: format!("{} is required", field.label),
            }),
            None => Ok(()),
        }
    }

    /// Formatted `(label, value)` pairs of a record for the list columns
    #[must_use]
    pub fn display_row(&self, record: &dyn Record) -> Vec<(String, String)> {
        self.list_columns()
            .map(|field| {
                let value = record.field_value(&field.name).unwrap_or(FieldValue::Null);
                (
                    field.label.clone(),
                    format_field_value_with(&value, &self.timestamp_format),
                )
            })
            .collect()
    }

    async fn run_pre_save(&self, ctx: &Context, kind: SaveKind, data: &mut FieldMap) -> Result<()> {
        let Some(hook) = &self.pre_save else {
            return Ok(());
        };
        hook.before_save(ctx, kind, data)
            .await
            .map_err(|err| AdminError::hook(&self.name, err))
    }
}
