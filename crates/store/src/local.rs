//! File-backed key/value storage driver
//!
//! Persists each key as one JSON file under a root directory. Keys follow
//! the same shape as the in-memory driver (`draft:{id}`, `published:{id}`,
//! `global`); the `:` separator is mapped to `.` for the file name.

use crate::driver::{
    draft_key, next_draft_version, next_publish_version, published_key, stamped, GLOBAL_KEY,
};
use crate::{Result, StorageDriver};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use template_model::{TemplateDocument, ThemeTokens};

/// File-per-key implementation of [`StorageDriver`]
pub struct LocalKvDriver {
    root: PathBuf,
}

impl LocalKvDriver {
    /// Create a driver rooted at the given directory, creating it if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The root directory holding the stored files
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key.replace(':', ".")))
    }

    async fn read_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding unreadable file {}: {e}", path.display());
                None
            }
        }
    }

    async fn write_value<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.key_path(key), json).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageDriver for LocalKvDriver {
    async fn get_draft(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self.read_value(&draft_key(id)).await)
    }

    async fn save_draft(
        &self,
        id: &str,
        document: &TemplateDocument,
    ) -> Result<TemplateDocument> {
        let existing = self.read_value::<TemplateDocument>(&draft_key(id)).await;
        let stored = stamped(document, next_draft_version(document, existing.as_ref()));
        self.write_value(&draft_key(id), &stored).await?;
        Ok(stored)
    }

    async fn get_published(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self.read_value(&published_key(id)).await)
    }

    async fn publish(&self, id: &str, document: &TemplateDocument) -> Result<TemplateDocument> {
        let draft = self.read_value::<TemplateDocument>(&draft_key(id)).await;
        let published = self
            .read_value::<TemplateDocument>(&published_key(id))
            .await;
        let stored = stamped(
            document,
            next_publish_version(document, draft.as_ref(), published.as_ref()),
        );
        self.write_value(&published_key(id), &stored).await?;
        self.write_value(&draft_key(id), &stored).await?;
        Ok(stored)
    }

    async fn get_global_settings(&self) -> Result<Option<ThemeTokens>> {
        Ok(self.read_value(GLOBAL_KEY).await)
    }

    async fn save_global_settings(&self, settings: &ThemeTokens) -> Result<()> {
        self.write_value(GLOBAL_KEY, settings).await
    }
}
