//! Persisted display order of models
//!
//! The order is stored in a [`SettingsStore`] as a JSON array of entity names
//! under a single key. A missing or unreadable value falls back to
//! registration order; it never fails a listing.

use crate::common::SettingsStore;
use crate::error::{AdminError, Result};

/// Order in which models are listed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayOrder {
    /// Registration order
    #[default]
    Registration,
    /// Explicit order of entity names saved by a user
    Persisted(Vec<String>),
}

impl DisplayOrder {
    /// Parse a stored value
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Vec<String>>(raw).map(Self::Persisted)
    }

    /// Load the saved order from `store`
    pub async fn load(store: &dyn SettingsStore, key: &str) -> Self {
        match store.get(key).await {
            Ok(Some(raw)) => Self::parse(&raw).unwrap_or_else(|err| {
                log::warn!("Ignoring unreadable model order under `{key}`: {err}");
                Self::Registration
            }),
            Ok(None) => Self::Registration,
            Err(err) => {
                log::warn!("Could not read model order under `{key}`: {err:#}");
                Self::Registration
            }
        }
    }

    /// Save `names` as the display order, returning the new order
    pub async fn persist(store: &dyn SettingsStore, key: &str, names: Vec<String>) -> Result<Self> {
        let raw = serde_json::to_string(&names).map_err(|err| AdminError::settings(err.into()))?;
        store
            .upsert(key, raw)
            .await
            .map_err(AdminError::settings)?;
        Ok(Self::Persisted(names))
    }

    /// Saved names, if any
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Registration => None,
            Self::Persisted(names) => Some(names),
        }
    }
}
