//! Settings store implementations
//!
//! [`MemorySettings`] keeps values in process memory. [`FileSettings`] keeps
//! them in a JSON object file, rewritten atomically on every upsert.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::Context as _;
use futures::future::BoxFuture;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::common::SettingsStore;

/// In-process key/value settings
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, anyhow::Result<Option<String>>> {
        let value = self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        Box::pin(async move { Ok(value) })
    }

    fn upsert<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, anyhow::Result<()>> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
        Box::pin(async { Ok(()) })
    }
}

/// Settings kept in a JSON object file
///
/// String values are stored as JSON strings. A missing file reads as empty.
/// Writes go through a temporary file and a rename so readers never see a
/// partial file.
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSettings {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> anyhow::Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read settings file {}", self.path.display()));
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("Settings file {} is not a JSON object", self.path.display()))
    }

    async fn write_all(&self, values: &Map<String, Value>) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&tmp, raw)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, anyhow::Result<Option<String>>> {
        Box::pin(async move {
            let values = self.read_all().await?;
            Ok(values.get(key).map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            }))
        })
    }

    fn upsert<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            let _guard = self.write_lock.lock().await;
            let mut values = self.read_all().await?;
            values.insert(key.to_owned(), Value::String(value));
            self.write_all(&values).await?;
            log::debug!("Saved setting `{key}` to {}", self.path.display());
            Ok(())
        })
    }
}
