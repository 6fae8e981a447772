//! Immutable catalog of registered models
//!
//! Registration happens once at startup through a [`CatalogBuilder`]. The
//! resulting [`Catalog`] is read-only and can be shared freely between
//! request handlers.

use std::sync::Arc;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::common::DataClient;
use crate::config::AdminConfig;
use crate::dispatch::Dispatcher;
use crate::error::{AdminError, Result};
use crate::model::AdminModel;
use crate::schema::extract_model_fields;

use super::model_config::ModelConfig;
use super::order::DisplayOrder;
use super::registration::ModelRegistration;

/// Naive English plural: `es` after a trailing `s`, otherwise `s`
///
/// Irregular plurals need an explicit
/// [`with_plural`](ModelRegistration::with_plural).
#[must_use]
pub fn pluralize(name: &str) -> String {
    if name.ends_with(['s', 'S']) {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}

fn catalog_key(name: &str) -> String {
    name.to_lowercase()
}

/// Collects model registrations into a [`Catalog`]
pub struct CatalogBuilder {
    client: Arc<dyn DataClient>,
    config: AdminConfig,
    models: Vec<ModelConfig>,
    index: FxHashMap<String, usize>,
}

impl CatalogBuilder {
    /// Start a catalog whose models are served by `client`
    #[must_use]
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self {
            client,
            config: AdminConfig::default(),
            models: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AdminConfig) -> Self {
        self.config = config;
        self
    }

    /// Register model type `T`
    ///
    /// Registering the same entity again replaces the earlier configuration
    /// but keeps its position.
    pub fn register<T: AdminModel>(&mut self, registration: ModelRegistration<T>) -> &mut Self {
        let name = T::ENTITY_NAME.to_owned();
        let mut fields = extract_model_fields::<T>(&registration.overrides);
        fields.extend(
            registration
                .extra_fields
                .into_iter()
                .map(|field| field.normalized()),
        );

        let mut dispatcher = Dispatcher::new(
            registration.handle.unwrap_or_else(|| name.clone()),
            Arc::clone(&self.client),
        );
        if let Some(modifier) = registration.query_modifier {
            dispatcher = dispatcher.with_query_modifier(modifier);
        }

        let display_name = registration.display_name.unwrap_or_else(|| name.clone());
        let plural = registration
            .plural
            .unwrap_or_else(|| pluralize(&display_name));

        log::info!(
            "Registered model {name} ({} fields, handle `{}`)",
            fields.len(),
            dispatcher.entity()
        );

        let config = ModelConfig {
            name,
            display_name,
            plural,
            icon: registration.icon,
            fields,
            dispatcher,
            pre_save: registration.pre_save,
            timestamp_format: self.config.timestamp_format.clone(),
            default_per_page: self.config.default_per_page,
            max_per_page: self.config.max_per_page,
        };

        let key = catalog_key(&config.name);
        if let Some(&position) = self.index.get(&key) {
            log::debug!("Replacing earlier registration of {}", config.name);
            self.models[position] = config;
        } else {
            self.index.insert(key, self.models.len());
            self.models.push(config);
        }
        self
    }

    /// Freeze the registrations
    #[must_use]
    pub fn build(self) -> Catalog {
        Catalog {
            models: self.models,
            index: self.index,
            config: self.config,
        }
    }
}

/// Read-only set of registered models
#[derive(Debug)]
pub struct Catalog {
    models: Vec<ModelConfig>,
    index: FxHashMap<String, usize>,
    config: AdminConfig,
}

impl Catalog {
    /// Look up a model by entity name, ignoring case
    pub fn get(&self, name: &str) -> Result<&ModelConfig> {
        self.position(name)
            .map(|position| &self.models[position])
            .ok_or_else(|| AdminError::EntityNotFound(name.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Models in registration order
    pub fn models(&self) -> impl Iterator<Item = &ModelConfig> {
        self.models.iter()
    }

    /// Models in the given display order
    ///
    /// Names no longer registered are dropped. Registered models missing from
    /// a persisted order follow in registration order.
    #[must_use]
    pub fn ordered(&self, order: &DisplayOrder) -> Vec<&ModelConfig> {
        let DisplayOrder::Persisted(names) = order else {
            return self.models.iter().collect();
        };

        names
            .iter()
            .filter_map(|name| self.position(name))
            .chain(0..self.models.len())
            .unique()
            .map(|position| &self.models[position])
            .collect()
    }

    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        &self.config
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&catalog_key(name)).copied()
    }
}
