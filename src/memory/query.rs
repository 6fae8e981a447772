//! Queries over a memory table

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::common::{Context, EntityQuery};
use crate::error::StoreResult;
use crate::model::{RecordId, RecordRef};
use crate::value::{FieldMap, FieldValue};

use super::{TableInner, compare_values};

pub(super) struct MemoryQuery {
    inner: Arc<TableInner>,
    limit: Option<usize>,
    offset: usize,
    order: Option<(String, bool)>,
    filters: Vec<(String, FieldValue)>,
}

impl MemoryQuery {
    pub(super) const fn new(inner: Arc<TableInner>) -> Self {
        Self {
            inner,
            limit: None,
            offset: 0,
            order: None,
            filters: Vec::new(),
        }
    }

    fn matches(&self, row: &FieldMap) -> bool {
        self.filters
            .iter()
            .all(|(field, value)| row.get(field) == Some(value))
    }

    /// Matching rows in query order, before limit and offset
    fn matching_rows(&self) -> Vec<(RecordId, FieldMap)> {
        let state = self.inner.read();
        let mut rows: Vec<_> = state
            .rows
            .iter()
            .filter(|(_, row)| self.matches(row))
            .map(|(id, row)| (*id, row.clone()))
            .collect();
        drop(state);

        if let Some((field, descending)) = &self.order {
            rows.sort_by(|(_, a), (_, b)| {
                let ordering = compare_values(a.get(field), b.get(field));
                if *descending { ordering.reverse() } else { ordering }
            });
        }
        rows
    }
}

impl EntityQuery for MemoryQuery {
    fn limit(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    fn offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    fn order_by(&mut self, field: &str, descending: bool) {
        self.order = Some((field.to_owned(), descending));
    }

    fn filter_eq(&mut self, field: &str, value: FieldValue) {
        self.filters.push((field.to_owned(), value));
    }

    fn all<'a>(self: Box<Self>, ctx: &'a Context) -> BoxFuture<'a, StoreResult<Vec<RecordRef>>> {
        Box::pin(async move {
            ctx.check()?;
            let records = self
                .matching_rows()
                .into_iter()
                .skip(self.offset)
                .take(self.limit.unwrap_or(usize::MAX))
                .map(|(id, row)| self.inner.record(id, &row))
                .collect();
            Ok(records)
        })
    }

    fn count<'a>(self: Box<Self>, ctx: &'a Context) -> BoxFuture<'a, StoreResult<usize>> {
        Box::pin(async move {
            ctx.check()?;
            Ok(self.matching_rows().len())
        })
    }
}
