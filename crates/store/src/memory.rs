//! In-memory storage driver
//!
//! Key/value driver keeping everything in a process-local map. Primarily
//! for tests, development, and ephemeral preview sessions; nothing survives
//! a restart. Keys follow the key/value backend shape: `draft:{id}`,
//! `published:{id}`, `global`, with JSON string values.

use crate::driver::{
    draft_key, next_draft_version, next_publish_version, published_key, stamped, GLOBAL_KEY,
};
use crate::{Result, StorageDriver};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use template_model::{TemplateDocument, ThemeTokens};

/// In-memory implementation of [`StorageDriver`]
///
/// Thread-safe via an internal `RwLock`; share it across tasks with `Arc`.
#[derive(Debug, Default)]
pub struct MemoryDriver {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryDriver {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn key_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Drop every stored entry
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().unwrap();
        let json = entries.get(key)?;
        match serde_json::from_str(json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding unreadable entry {key}: {e}");
                None
            }
        }
    }

    fn write_value<T: Serialize>(&self, key: String, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.entries.write().unwrap().insert(key, json);
        Ok(())
    }
}

#[async_trait]
impl StorageDriver for MemoryDriver {
    async fn get_draft(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self.read_value(&draft_key(id)))
    }

    async fn save_draft(
        &self,
        id: &str,
        document: &TemplateDocument,
    ) -> Result<TemplateDocument> {
        let existing = self.read_value::<TemplateDocument>(&draft_key(id));
        let stored = stamped(document, next_draft_version(document, existing.as_ref()));
        self.write_value(draft_key(id), &stored)?;
        Ok(stored)
    }

    async fn get_published(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self.read_value(&published_key(id)))
    }

    async fn publish(&self, id: &str, document: &TemplateDocument) -> Result<TemplateDocument> {
        let draft = self.read_value::<TemplateDocument>(&draft_key(id));
        let published = self.read_value::<TemplateDocument>(&published_key(id));
        let stored = stamped(
            document,
            next_publish_version(document, draft.as_ref(), published.as_ref()),
        );
        self.write_value(published_key(id), &stored)?;
        self.write_value(draft_key(id), &stored)?;
        Ok(stored)
    }

    async fn get_global_settings(&self) -> Result<Option<ThemeTokens>> {
        Ok(self.read_value(GLOBAL_KEY))
    }

    async fn save_global_settings(&self, settings: &ThemeTokens) -> Result<()> {
        self.write_value(GLOBAL_KEY.to_string(), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_reads_are_none() {
        let driver = MemoryDriver::new();
        assert!(driver.get_draft("home").await.unwrap().is_none());
        assert!(driver.get_published("home").await.unwrap().is_none());
        assert!(driver.get_global_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_draft_bumps_version() {
        let driver = MemoryDriver::new();
        let doc = TemplateDocument::starter("home");

        let v1 = driver.save_draft("home", &doc).await.unwrap();
        assert_eq!(v1.version, 1);
        let v2 = driver.save_draft("home", &doc).await.unwrap();
        assert_eq!(v2.version, 2);

        let loaded = driver.get_draft("home").await.unwrap().unwrap();
        assert_eq!(loaded.version, 2);
        assert_eq!(loaded.sections, doc.sections);
    }

    #[tokio::test]
    async fn test_corrupt_entry_degrades_to_none() {
        let driver = MemoryDriver::new();
        driver
            .entries
            .write()
            .unwrap()
            .insert(draft_key("home"), "not json".to_string());

        assert!(driver.get_draft("home").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let driver = MemoryDriver::new();
        driver
            .save_draft("home", &TemplateDocument::new("home"))
            .await
            .unwrap();
        assert_eq!(driver.key_count(), 1);
        driver.clear();
        assert_eq!(driver.key_count(), 0);
    }
}
