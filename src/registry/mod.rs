//! Model registry
//!
//! The [`Registry`] combines the immutable [`Catalog`] of registered models
//! with a user-editable display order kept in a [`SettingsStore`].
//!
//! # Example
//!
//! ```ignore
//! let mut builder = CatalogBuilder::new(client);
//! builder
//!     .register(ModelRegistration::<User>::new().hide_fields(["password_hash"]))
//!     .register(ModelRegistration::<Post>::new().with_icon("file-text"));
//! let registry = Registry::new(builder.build(), Arc::new(MemorySettings::new()));
//!
//! registry.save_order(&["Post", "User"]).await?;
//! for model in registry.list().await {
//!     println!("{}", model.plural());
//! }
//! ```

mod catalog;
mod model_config;
mod order;
mod pagination;
mod registration;

use std::sync::{Arc, PoisonError, RwLock};

pub use catalog::{Catalog, CatalogBuilder, pluralize};
pub use model_config::ModelConfig;
pub use order::DisplayOrder;
pub use pagination::Page;
pub use registration::ModelRegistration;

use crate::common::SettingsStore;
use crate::error::Result;

/// Registered models plus their persisted display order
pub struct Registry {
    catalog: Catalog,
    settings: Arc<dyn SettingsStore>,
    order: RwLock<DisplayOrder>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("catalog", &self.catalog)
            .field("order", &self.display_order())
            .finish_non_exhaustive()
    }
}

impl Registry {
    #[must_use]
    pub fn new(catalog: Catalog, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            catalog,
            settings,
            order: RwLock::new(DisplayOrder::Registration),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a model by entity name, ignoring case
    pub fn get(&self, name: &str) -> Result<&ModelConfig> {
        self.catalog.get(name)
    }

    /// All models in display order
    ///
    /// The saved order is reloaded on every call so edits made by another
    /// process show up without a restart.
    pub async fn list(&self) -> Vec<&ModelConfig> {
        let order = self.refresh_order().await;
        self.catalog.ordered(&order)
    }

    /// Reload the saved order into the cache
    pub async fn refresh_order(&self) -> DisplayOrder {
        let order = DisplayOrder::load(self.settings.as_ref(), self.order_key()).await;
        self.set_order(order.clone());
        order
    }

    /// Cached display order as of the last load or save
    #[must_use]
    pub fn display_order(&self) -> DisplayOrder {
        self.order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist a new display order and use it immediately
    pub async fn save_order<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let names = names.iter().map(|name| name.as_ref().to_owned()).collect();
        let order = DisplayOrder::persist(self.settings.as_ref(), self.order_key(), names).await?;
        log::debug!("Saved model order {order:?}");
        self.set_order(order);
        Ok(())
    }

    fn order_key(&self) -> &str {
        &self.catalog.config().order_settings_key
    }

    fn set_order(&self, order: DisplayOrder) {
        *self.order.write().unwrap_or_else(PoisonError::into_inner) = order;
    }
}
