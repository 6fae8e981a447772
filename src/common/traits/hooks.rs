//! Registration hooks
//!
//! One trait per hook kind. Plain closures implement both traits, so most
//! registrations never name them.

use futures::future::BoxFuture;

use crate::common::Context;
use crate::common::traits::EntityQuery;
use crate::model::RecordId;
use crate::value::FieldMap;

/// Which mutation a pre-save hook runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Create,
    Update(RecordId),
}

/// Transform or reject submitted data before it reaches the data client
///
/// Typical uses are hashing a virtual `password` field into `password_hash`
/// and rejecting duplicates of a unique field. An error aborts the mutation.
pub trait PreSaveHook: Send + Sync {
    fn before_save<'a>(
        &'a self,
        ctx: &'a Context,
        kind: SaveKind,
        data: &'a mut FieldMap,
    ) -> BoxFuture<'a, anyhow::Result<()>>;
}

impl<F> PreSaveHook for F
where
    F: Fn(SaveKind, &mut FieldMap) -> anyhow::Result<()> + Send + Sync,
{
    fn before_save<'a>(
        &'a self,
        _ctx: &'a Context,
        kind: SaveKind,
        data: &'a mut FieldMap,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        let result = self(kind, data);
        Box::pin(futures::future::ready(result))
    }
}

/// Adjust every read query of an entity (ordering, scoping filters)
pub trait QueryModifier: Send + Sync {
    fn modify(&self, query: &mut dyn EntityQuery);
}

impl<F> QueryModifier for F
where
    F: Fn(&mut dyn EntityQuery) + Send + Sync,
{
    fn modify(&self, query: &mut dyn EntityQuery) {
        self(query);
    }
}
