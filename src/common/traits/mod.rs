//! Collaborator traits
//!
//! The engine is written against these interfaces only: the per-entity data
//! client, the hooks a registration may attach, and the settings store that
//! persists display order.

pub mod adapter;
pub mod hooks;
pub mod settings;

pub use adapter::{DataClient, EntityAdapter, EntityQuery, MutationBuilder};
pub use hooks::{PreSaveHook, QueryModifier, SaveKind};
pub use settings::SettingsStore;
