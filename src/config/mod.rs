//! Configuration for the admin engine.

use serde::Deserialize;

use crate::error::Result;
use crate::value::DISPLAY_TIMESTAMP_FORMAT;

/// Configuration for the admin engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Settings-store key holding the persisted display order
    pub order_settings_key: String,
    /// Page size used when the caller does not ask for one
    pub default_per_page: usize,
    /// Upper bound on the page size a caller may request
    pub max_per_page: usize,
    /// `chrono` format string for timestamps in read views
    pub timestamp_format: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            order_settings_key: "admin_model_order".to_owned(),
            default_per_page: 20,
            max_per_page: 100,
            timestamp_format: DISPLAY_TIMESTAMP_FORMAT.to_owned(),
        }
    }
}

impl AdminConfig {
    /// Load a configuration from JSON, filling unset keys with defaults
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
