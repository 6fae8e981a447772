//! Data-client adapter traits
//!
//! A data client exposes one [`EntityAdapter`] per entity name. The adapter
//! offers a fixed capability set (query, get, create, update, delete) so that
//! a single dispatcher serves every registered entity through interface
//! dispatch. Adapters are usually thin wrappers over generated store code.
//!
//! Every adapter method has a default that reports
//! [`StoreError::Unsupported`]; the dispatcher turns that into a
//! `MissingOperation` failure, which lets read-only adapters implement only
//! what they provide.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::common::Context;
use crate::error::{StoreError, StoreResult};
use crate::model::{RecordId, RecordRef};
use crate::schema::NativeType;
use crate::value::FieldValue;

/// Uniform data client handing out per-entity handles
pub trait DataClient: Send + Sync {
    /// Get the handle for an entity, or `None` if the client has none
    fn entity(&self, name: &str) -> Option<Arc<dyn EntityAdapter>>;
}

/// Per-entity handle with the fixed CRUD capability set
pub trait EntityAdapter: Send + Sync {
    /// Begin a query over all records of the entity
    fn query(&self) -> StoreResult<Box<dyn EntityQuery>> {
        Err(StoreError::Unsupported)
    }

    /// Fetch a single record by identifier
    ///
    /// Returns `Ok(None)` or [`StoreError::NotFound`] when the record does not
    /// exist; the dispatcher treats both the same.
    fn get<'a>(
        &'a self,
        _ctx: &'a Context,
        _id: RecordId,
    ) -> BoxFuture<'a, StoreResult<Option<RecordRef>>> {
        Box::pin(async { Err(StoreError::Unsupported) })
    }

    /// Begin a create mutation
    fn create(&self) -> StoreResult<Box<dyn MutationBuilder>> {
        Err(StoreError::Unsupported)
    }

    /// Begin an update mutation of one record
    fn update_by_id(&self, _id: RecordId) -> StoreResult<Box<dyn MutationBuilder>> {
        Err(StoreError::Unsupported)
    }

    /// Delete one record, returning the number of records removed
    fn delete_by_id<'a>(&'a self, _ctx: &'a Context, _id: RecordId) -> BoxFuture<'a, StoreResult<usize>> {
        Box::pin(async { Err(StoreError::Unsupported) })
    }
}

/// Query under construction
///
/// Modifiers run before execution; `all` and `count` consume the query.
pub trait EntityQuery: Send {
    /// Limit the number of returned records
    fn limit(&mut self, limit: usize);

    /// Skip the first records
    fn offset(&mut self, offset: usize);

    /// Order the results by a field
    fn order_by(&mut self, field: &str, descending: bool);

    /// Keep only records whose field equals the value
    fn filter_eq(&mut self, field: &str, value: FieldValue);

    /// Execute the query
    fn all<'a>(self: Box<Self>, ctx: &'a Context) -> BoxFuture<'a, StoreResult<Vec<RecordRef>>>;

    /// Count the matching records
    fn count<'a>(self: Box<Self>, ctx: &'a Context) -> BoxFuture<'a, StoreResult<usize>>;
}

/// Create or update mutation under construction
pub trait MutationBuilder: Send {
    /// Declared value type of the setter for a field, or `None` if the builder
    /// has no setter by that name
    fn setter(&self, field: &str) -> Option<NativeType>;

    /// Set a field; the value has already been coerced to the setter's type
    fn set(&mut self, field: &str, value: FieldValue);

    /// Persist the mutation and return the stored record
    fn save<'a>(self: Box<Self>, ctx: &'a Context) -> BoxFuture<'a, StoreResult<RecordRef>>;
}
