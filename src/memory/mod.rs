//! In-process data client
//!
//! [`MemoryClient`] serves registered [`AdminModel`] types from memory. Each
//! model gets a table whose columns come from the model's declared fields:
//!
//! * `id` is assigned on create, counting up from 1
//! * `created_at` / `updated_at` are stamped on save when declared
//! * a reference field `author` is stored and set as `author_id`
//!
//! Queries support equality filters, single-column ordering and limit/offset.

mod query;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use futures::future::BoxFuture;
use rustc_hash::FxHashMap;

use crate::common::{Context, DataClient, EntityAdapter, EntityQuery, MutationBuilder};
use crate::error::{StoreError, StoreResult};
use crate::model::{AdminModel, Record, RecordId, RecordRef};
use crate::schema::NativeType;
use crate::schema::field_def::{INTERNAL_FIELDS, READONLY_FIELDS};
use crate::value::{FieldMap, FieldValue, Reference};

use query::MemoryQuery;

const ID_COLUMN: &str = "id";
const CREATED_AT_COLUMN: &str = "created_at";
const UPDATED_AT_COLUMN: &str = "updated_at";

/// Data client holding every table in memory
#[derive(Debug, Default)]
pub struct MemoryClient {
    tables: FxHashMap<String, Arc<MemoryTable>>,
}

impl MemoryClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table for `T` under its entity name
    #[must_use]
    pub fn with_model<T: AdminModel>(self) -> Self {
        self.with_model_as::<T>(T::ENTITY_NAME)
    }

    /// Add a table for `T` under a custom handle name
    #[must_use]
    pub fn with_model_as<T: AdminModel>(mut self, handle: impl Into<String>) -> Self {
        let handle = handle.into();
        let table = MemoryTable::for_model::<T>(&handle);
        self.tables.insert(handle, Arc::new(table));
        self
    }

    /// Table registered under `handle`
    #[must_use]
    pub fn table(&self, handle: &str) -> Option<&MemoryTable> {
        self.tables.get(handle).map(Arc::as_ref)
    }
}

impl DataClient for MemoryClient {
    fn entity(&self, name: &str) -> Option<Arc<dyn EntityAdapter>> {
        self.tables
            .get(name)
            .map(|table| Arc::clone(table) as Arc<dyn EntityAdapter>)
    }
}

/// Table layout derived from a model's fields
#[derive(Debug)]
struct TableSchema {
    entity: String,
    columns: Vec<(&'static str, NativeType)>,
    setters: FxHashMap<String, NativeType>,
    /// Reference column to the column holding its id
    references: Vec<(&'static str, String)>,
}

impl TableSchema {
    fn for_model<T: AdminModel>(entity: &str) -> Self {
        let columns: Vec<_> = T::FIELDS
            .iter()
            .filter(|shape| shape.exported && !INTERNAL_FIELDS.contains(&shape.name))
            .map(|shape| (shape.name, shape.native))
            .collect();

        let mut setters = FxHashMap::default();
        let mut references = Vec::new();
        for &(name, native) in &columns {
            if READONLY_FIELDS.contains(&name) {
                continue;
            }
            if *native.underlying() == NativeType::Reference {
                let id_column = format!("{name}_id");
                let id_type = if native.is_nullable() {
                    NativeType::Optional(&NativeType::Signed)
                } else {
                    NativeType::Signed
                };
                setters.insert(id_column.clone(), id_type);
                references.push((name, id_column));
            } else {
                setters.insert(name.to_owned(), native);
            }
        }

        Self {
            entity: entity.to_owned(),
            columns,
            setters,
            references,
        }
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(column, _)| *column == name)
    }
}

#[derive(Debug, Default)]
struct TableState {
    next_id: RecordId,
    rows: BTreeMap<RecordId, FieldMap>,
}

#[derive(Debug)]
struct TableInner {
    schema: TableSchema,
    state: RwLock<TableState>,
}

impl TableInner {
    fn read(&self) -> RwLockReadGuard<'_, TableState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, id: RecordId, row: &FieldMap) -> RecordRef {
        let mut values = row.clone();
        for (column, id_column) in &self.schema.references {
            let reference = match row.get(id_column) {
                Some(FieldValue::Integer(target)) => Some(Reference {
                    id: *target,
                    label: format!("#{target}"),
                    email: None,
                }),
                _ => None,
            };
            values.insert((*column).to_owned(), FieldValue::Reference(reference));
        }
        Box::new(MemoryRecord { id, values })
    }
}

/// One table of a [`MemoryClient`]
#[derive(Debug, Clone)]
pub struct MemoryTable {
    inner: Arc<TableInner>,
}

impl MemoryTable {
    fn for_model<T: AdminModel>(entity: &str) -> Self {
        Self {
            inner: Arc::new(TableInner {
                schema: TableSchema::for_model::<T>(entity),
                state: RwLock::new(TableState {
                    next_id: 1,
                    rows: BTreeMap::new(),
                }),
            }),
        }
    }

    /// Number of stored rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityAdapter for MemoryTable {
    fn query(&self) -> StoreResult<Box<dyn EntityQuery>> {
        Ok(Box::new(MemoryQuery::new(Arc::clone(&self.inner))))
    }

    fn get<'a>(&'a self, ctx: &'a Context, id: RecordId) -> BoxFuture<'a, StoreResult<Option<RecordRef>>> {
        Box::pin(async move {
            ctx.check()?;
            let state = self.inner.read();
            Ok(state.rows.get(&id).map(|row| self.inner.record(id, row)))
        })
    }

    fn create(&self) -> StoreResult<Box<dyn MutationBuilder>> {
        Ok(Box::new(MemoryBuilder {
            inner: Arc::clone(&self.inner),
            target: None,
            values: FieldMap::new(),
        }))
    }

    fn update_by_id(&self, id: RecordId) -> StoreResult<Box<dyn MutationBuilder>> {
        if !self.inner.read().rows.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        Ok(Box::new(MemoryBuilder {
            inner: Arc::clone(&self.inner),
            target: Some(id),
            values: FieldMap::new(),
        }))
    }

    fn delete_by_id<'a>(&'a self, ctx: &'a Context, id: RecordId) -> BoxFuture<'a, StoreResult<usize>> {
        Box::pin(async move {
            ctx.check()?;
            let removed = self.inner.write().rows.remove(&id);
            Ok(usize::from(removed.is_some()))
        })
    }
}

/// Pending create or update of one row
#[derive(Debug)]
struct MemoryBuilder {
    inner: Arc<TableInner>,
    target: Option<RecordId>,
    values: FieldMap,
}

impl MutationBuilder for MemoryBuilder {
    fn setter(&self, field: &str) -> Option<NativeType> {
        self.inner.schema.setters.get(field).copied()
    }

    fn set(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_owned(), value);
    }

    fn save<'a>(self: Box<Self>, ctx: &'a Context) -> BoxFuture<'a, StoreResult<RecordRef>> {
        Box::pin(async move {
            ctx.check()?;
            let Self {
                inner,
                target,
                values,
            } = *self;
            let schema = &inner.schema;
            let now = FieldValue::Timestamp(Utc::now());

            let mut state = inner.write();
            let id = match target {
                Some(id) => id,
                None => {
                    let id = state.next_id;
                    state.next_id += 1;
                    let mut row: FieldMap = schema
                        .columns
                        .iter()
                        .filter(|(name, _)| !schema.references.iter().any(|(column, _)| column == name))
                        .map(|(name, _)| ((*name).to_owned(), FieldValue::Null))
                        .collect();
                    for (_, id_column) in &schema.references {
                        row.insert(id_column.clone(), FieldValue::Null);
                    }
                    if schema.has_column(ID_COLUMN) {
                        row.insert(ID_COLUMN.to_owned(), FieldValue::Integer(id));
                    }
                    if schema.has_column(CREATED_AT_COLUMN) {
                        row.insert(CREATED_AT_COLUMN.to_owned(), now.clone());
                    }
                    state.rows.insert(id, row);
                    id
                }
            };

            let Some(row) = state.rows.get_mut(&id) else {
                return Err(StoreError::NotFound);
            };
            row.extend(values);
            if schema.has_column(UPDATED_AT_COLUMN) {
                row.insert(UPDATED_AT_COLUMN.to_owned(), now);
            }
            log::debug!("Saved {} #{id}", schema.entity);
            Ok(inner.record(id, row))
        })
    }
}

/// Row snapshot handed out by a [`MemoryClient`]
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    id: RecordId,
    values: FieldMap,
}

impl Record for MemoryRecord {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).cloned()
    }
}

/// Total order over stored values: nulls first, then by value
fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    use FieldValue::{Bool, Float, Integer, Null, Reference as Ref, Text, Timestamp};

    match (a.unwrap_or(&Null), b.unwrap_or(&Null)) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,
        (Bool(a), Bool(b)) => a.cmp(b),
        (Integer(a), Integer(b)) => a.cmp(b),
        (Float(a), Float(b)) => a.total_cmp(b),
        (Integer(a), Float(b)) => (*a as f64).total_cmp(b),
        (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)),
        (Text(a), Text(b)) => a.cmp(b),
        (Timestamp(a), Timestamp(b)) => a.cmp(b),
        (Ref(a), Ref(b)) => a.as_ref().map(|r| r.id).cmp(&b.as_ref().map(|r| r.id)),
        (a, b) => format!("{a:?}").cmp(&format!("{b:?}")),
    }
}
