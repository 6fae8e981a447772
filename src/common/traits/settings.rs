//! Generic key-value settings store

use futures::future::BoxFuture;

/// Persistence of opaque text values by key
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, anyhow::Result<Option<String>>>;

    /// Insert or replace the value stored under `key`
    fn upsert<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, anyhow::Result<()>>;
}
