//! Generic CRUD dispatcher
//!
//! One [`Dispatcher`] per registered entity performs list, count, get, create,
//! update and delete against whatever handle the data client exposes for that
//! entity. Nothing here is entity-specific: the handle is looked up by name on
//! every call and driven through the [`EntityAdapter`] capability set.
//!
//! Store failures are translated as follows:
//!
//! * no handle for the entity: [`DispatchError::MissingHandle`]
//! * [`StoreError::Unsupported`]: [`DispatchError::MissingOperation`]
//! * a missing record on get, update or delete: [`AdminError::RecordNotFound`]
//! * a delete touching more than one record: [`DispatchError::UnexpectedArity`]
//! * anything else: [`DispatchError::Underlying`]

pub mod setters;

use std::fmt;
use std::sync::Arc;

use crate::common::{Context, DataClient, EntityAdapter, EntityQuery, MutationBuilder, QueryModifier};
use crate::error::{AdminError, DispatchError, Result, StoreError};
use crate::model::{RecordId, RecordRef};
use crate::schema::FieldDescriptor;
use crate::value::FieldMap;

pub use setters::{apply_fields, resolve_setter};

/// CRUD access to one entity through a [`DataClient`]
#[derive(Clone)]
pub struct Dispatcher {
    entity: String,
    client: Arc<dyn DataClient>,
    modifier: Option<Arc<dyn QueryModifier>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("entity", &self.entity)
            .field("has_modifier", &self.modifier.is_some())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher for the entity handle named `entity`
    #[must_use]
    pub fn new(entity: impl Into<String>, client: Arc<dyn DataClient>) -> Self {
        Self {
            entity: entity.into(),
            client,
            modifier: None,
        }
    }

    /// Apply `modifier` to every read query before execution
    #[must_use]
    pub fn with_query_modifier(mut self, modifier: Arc<dyn QueryModifier>) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Name of the entity handle this dispatcher drives
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    fn handle(&self) -> Result<Arc<dyn EntityAdapter>> {
        self.client.entity(&self.entity).ok_or_else(|| {
            DispatchError::MissingHandle {
                entity: self.entity.clone(),
            }
            .into()
        })
    }

    fn begin_query(&self, operation: &'static str) -> Result<Box<dyn EntityQuery>> {
        let mut query = self
            .handle()?
            .query()
            .map_err(|err| self.store_error(operation, None, err))?;
        if let Some(modifier) = &self.modifier {
            modifier.modify(query.as_mut());
        }
        Ok(query)
    }

    /// Fetch every record of the entity
    pub async fn list_all(&self, ctx: &Context) -> Result<Vec<RecordRef>> {
        log::debug!("Listing all {} records", self.entity);
        self.begin_query("query")?
            .all(ctx)
            .await
            .map_err(|err| self.store_error("all", None, err))
    }

    /// Fetch at most `limit` records, skipping the first `offset`
    ///
    /// A zero limit or offset is not applied to the query at all, so a zero
    /// limit returns every record past the offset.
    pub async fn list_paginated(
        &self,
        ctx: &Context,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RecordRef>> {
        log::debug!(
            "Listing {} records (limit {limit}, offset {offset})",
            self.entity
        );
        let mut query = self.begin_query("query")?;
        if limit > 0 {
            query.limit(limit);
        }
        if offset > 0 {
            query.offset(offset);
        }
        query
            .all(ctx)
            .await
            .map_err(|err| self.store_error("all", None, err))
    }

    /// Count the records of the entity
    pub async fn count(&self, ctx: &Context) -> Result<usize> {
        self.begin_query("query")?
            .count(ctx)
            .await
            .map_err(|err| self.store_error("count", None, err))
    }

    /// Fetch one record by identifier
    pub async fn get_by_id(&self, ctx: &Context, id: RecordId) -> Result<RecordRef> {
        let handle = self.handle()?;
        match handle.get(ctx, id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(self.record_not_found(id)),
            Err(err) => Err(self.store_error("get", Some(id), err)),
        }
    }

    /// Create a record from submitted data
    pub async fn create(
        &self,
        ctx: &Context,
        data: &FieldMap,
        fields: &[FieldDescriptor],
    ) -> Result<RecordRef> {
        let mut builder = self
            .handle()?
            .create()
            .map_err(|err| self.store_error("create", None, err))?;
        let applied = apply_fields(builder.as_mut(), data, fields)?;
        log::debug!("Creating {} with {applied} fields", self.entity);
        self.save(ctx, builder, None).await
    }

    /// Update one record from submitted data
    pub async fn update(
        &self,
        ctx: &Context,
        id: RecordId,
        data: &FieldMap,
        fields: &[FieldDescriptor],
    ) -> Result<RecordRef> {
        let mut builder = self
            .handle()?
            .update_by_id(id)
            .map_err(|err| self.store_error("update_by_id", Some(id), err))?;
        let applied = apply_fields(builder.as_mut(), data, fields)?;
        log::debug!("Updating {} #{id} with {applied} fields", self.entity);
        self.save(ctx, builder, Some(id)).await
    }

    /// Delete one record by identifier
    pub async fn delete(&self, ctx: &Context, id: RecordId) -> Result<()> {
        let handle = self.handle()?;
        let removed = handle
            .delete_by_id(ctx, id)
            .await
            .map_err(|err| self.store_error("delete_by_id", Some(id), err))?;
        match removed {
            0 => Err(self.record_not_found(id)),
            1 => {
                log::debug!("Deleted {} #{id}", self.entity);
                Ok(())
            }
            actual => Err(DispatchError::UnexpectedArity {
                entity: self.entity.clone(),
                operation: "delete_by_id",
                expected: 1,
                actual,
            }
            .into()),
        }
    }

    async fn save(
        &self,
        ctx: &Context,
        builder: Box<dyn MutationBuilder>,
        id: Option<RecordId>,
    ) -> Result<RecordRef> {
        builder
            .save(ctx)
            .await
            .map_err(|err| self.store_error("save", id, err))
    }

    fn record_not_found(&self, id: RecordId) -> AdminError {
        AdminError::RecordNotFound {
            entity: self.entity.clone(),
            id,
        }
    }

    fn store_error(&self, operation: &'static str, id: Option<RecordId>, err: StoreError) -> AdminError {
        match (err, id) {
            (StoreError::Unsupported, _) => DispatchError::MissingOperation {
                entity: self.entity.clone(),
                operation,
            }
            .into(),
            (StoreError::NotFound, Some(id)) => self.record_not_found(id),
            (source, _) => {
                log::warn!("{operation} on {} failed: {source}", self.entity);
                DispatchError::Underlying {
                    entity: self.entity.clone(),
                    operation,
                    source,
                }
                .into()
            }
        }
    }
}
