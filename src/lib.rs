//! A generic administrative data-access engine.
//!
//! Register model types once at startup and get, for each of them, derived
//! form and display metadata plus list/count/get/create/update/delete through
//! a single generic dispatcher over a pluggable data client.
//!
//! ```ignore
//! use model_admin::{AdminModel, CatalogBuilder, ModelRegistration, Registry};
//!
//! #[derive(Debug, AdminModel)]
//! pub struct Fruit {
//!     pub id: i64,
//!     pub name: String,
//!     pub stock: i32,
//! }
//!
//! let mut builder = CatalogBuilder::new(client);
//! builder.register(ModelRegistration::<Fruit>::new());
//! let registry = Registry::new(builder.build(), settings);
//! ```

// Lets the derive macro refer to `::model_admin` from inside this crate
extern crate self as model_admin;

pub mod common;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod model;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod value;

// Core types
pub use config::AdminConfig;
pub use error::{AdminError, DispatchError, DispatchErrorKind, Result, StoreError, StoreResult};
pub use model::{AdminModel, Record, RecordId, RecordKey, RecordRef};

// The derive shares its name with the trait, like serde's
pub use model_admin_macros::AdminModel;

// Schema and values
pub use schema::{
    FieldDescriptor, FieldOverrides, FieldShape, NativeType, SemanticType, detect_field_type,
    extract_fields, extract_model_fields,
};
pub use value::{
    ConversionError, FieldMap, FieldValue, Reference, ToFieldValue, format_field_value,
    format_field_value_with,
};

// Data access
pub use common::{
    Context, DataClient, EntityAdapter, EntityQuery, MutationBuilder, PreSaveHook, QueryModifier,
    SaveKind, SettingsStore,
};
pub use dispatch::Dispatcher;
pub use memory::MemoryClient;
pub use registry::{
    Catalog, CatalogBuilder, DisplayOrder, ModelConfig, ModelRegistration, Page, Registry,
};
pub use settings::{FileSettings, MemorySettings};
