use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use model_admin::{
    AdminModel, CatalogBuilder, Context, DataClient, EntityAdapter, FieldMap, FieldValue,
    MemoryClient, MemorySettings, MutationBuilder, NativeType, Record, RecordId, RecordRef,
    Registry, StoreResult,
};

/// Initialise test logging once
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, AdminModel)]
pub struct Fruit {
    pub id: i64,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, AdminModel)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AdminModel)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[admin(reference)]
    pub author: Option<Box<User>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, AdminModel)]
#[admin(name = "A")]
pub struct Alpha {
    pub id: i64,
}

#[derive(Debug, AdminModel)]
#[admin(name = "B")]
pub struct Bravo {
    pub id: i64,
}

#[derive(Debug, AdminModel)]
#[admin(name = "C")]
pub struct Charlie {
    pub id: i64,
}

/// Build a form map from text pairs
pub fn form(entries: &[(&str, &str)]) -> FieldMap {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_owned(), FieldValue::from(*value)))
        .collect()
}

/// Registry over a fresh memory client holding `User` and `Post`
pub fn blog_registry() -> Registry {
    let client = MemoryClient::new().with_model::<User>().with_model::<Post>();
    let mut builder = CatalogBuilder::new(Arc::new(client));
    builder
        .register(model_admin::ModelRegistration::<User>::new())
        .register(model_admin::ModelRegistration::<Post>::new());
    Registry::new(builder.build(), Arc::new(MemorySettings::new()))
}

/// Record returned by [`RecordingAdapter`]
#[derive(Debug)]
pub struct SavedRecord {
    pub id: RecordId,
    pub values: FieldMap,
}

impl Record for SavedRecord {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).cloned()
    }
}

/// Adapter that only creates, recording every setter call
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    pub setters: Vec<(&'static str, NativeType)>,
    pub calls: Arc<Mutex<Vec<(String, FieldValue)>>>,
    pub saves: Arc<AtomicUsize>,
}

impl RecordingAdapter {
    #[must_use]
    pub fn with_setters(setters: &[(&'static str, NativeType)]) -> Self {
        Self {
            setters: setters.to_vec(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<(String, FieldValue)> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl EntityAdapter for RecordingAdapter {
    fn create(&self) -> StoreResult<Box<dyn MutationBuilder>> {
        Ok(Box::new(RecordingBuilder {
            setters: self.setters.clone(),
            calls: Arc::clone(&self.calls),
            saves: Arc::clone(&self.saves),
            values: FieldMap::new(),
        }))
    }
}

struct RecordingBuilder {
    setters: Vec<(&'static str, NativeType)>,
    calls: Arc<Mutex<Vec<(String, FieldValue)>>>,
    saves: Arc<AtomicUsize>,
    values: FieldMap,
}

impl MutationBuilder for RecordingBuilder {
    fn setter(&self, field: &str) -> Option<NativeType> {
        self.setters
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, native)| *native)
    }

    fn set(&mut self, field: &str, value: FieldValue) {
        self.calls
            .lock()
            .unwrap()
            .push((field.to_owned(), value.clone()));
        self.values.insert(field.to_owned(), value);
    }

    fn save<'a>(self: Box<Self>, _ctx: &'a Context) -> BoxFuture<'a, StoreResult<RecordRef>> {
        let id = self.saves.fetch_add(1, Ordering::SeqCst) as RecordId + 1;
        let record: RecordRef = Box::new(SavedRecord {
            id,
            values: self.values,
        });
        Box::pin(async move { Ok(record) })
    }
}

/// Data client serving one adapter under one entity name
pub struct SingleEntityClient {
    pub entity: &'static str,
    pub adapter: Arc<dyn EntityAdapter>,
}

impl DataClient for SingleEntityClient {
    fn entity(&self, name: &str) -> Option<Arc<dyn EntityAdapter>> {
        (name == self.entity).then(|| Arc::clone(&self.adapter))
    }
}
