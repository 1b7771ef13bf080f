//! Document-collection storage driver
//!
//! Mirrors the document-database backend shape: a `drafts` collection and a
//! `published` collection keyed by template id, plus a single `global`
//! settings document. Laid out on disk as one directory per collection with
//! one JSON document per file.
//!
//! ```text
//! data/
//! ├── drafts/{id}.json
//! ├── published/{id}.json
//! └── global.json
//! ```

use crate::driver::{next_draft_version, next_publish_version, stamped};
use crate::{Result, StorageDriver};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use template_model::{TemplateDocument, ThemeTokens};

const DRAFTS_COLLECTION: &str = "drafts";
const PUBLISHED_COLLECTION: &str = "published";
const GLOBAL_DOC: &str = "global.json";

/// Collection-pair implementation of [`StorageDriver`]
pub struct CollectionDriver {
    root: PathBuf,
}

impl CollectionDriver {
    /// Create a driver rooted at the given directory, creating the
    /// collection directories if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(root.join(DRAFTS_COLLECTION))?;
        std::fs::create_dir_all(root.join(PUBLISHED_COLLECTION))?;
        Ok(Self { root })
    }

    /// The root directory holding both collections
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root.join(collection).join(format!("{id}.json"))
    }

    async fn read_document<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let json = match tokio::fs::read_to_string(path).await {
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
                tracing::warn!("discarding unreadable document {}: {e}", path.display());
                None
            }
        }
    }

    async fn write_document<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// IDs of every document in the drafts collection
    pub async fn list_drafts(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(self.root.join(DRAFTS_COLLECTION)).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if let Some(id) = name.to_string_lossy().strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl StorageDriver for CollectionDriver {
    async fn get_draft(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self
            .read_document(&self.document_path(DRAFTS_COLLECTION, id))
            .await)
    }

    async fn save_draft(
        &self,
        id: &str,
        document: &TemplateDocument,
    ) -> Result<TemplateDocument> {
        let path = self.document_path(DRAFTS_COLLECTION, id);
        let existing = self.read_document::<TemplateDocument>(&path).await;
        let stored = stamped(document, next_draft_version(document, existing.as_ref()));
        self.write_document(&path, &stored).await?;
        Ok(stored)
    }

    async fn get_published(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self
            .read_document(&self.document_path(PUBLISHED_COLLECTION, id))
            .await)
    }

    async fn publish(&self, id: &str, document: &TemplateDocument) -> Result<TemplateDocument> {
        let draft_path = self.document_path(DRAFTS_COLLECTION, id);
        let published_path = self.document_path(PUBLISHED_COLLECTION, id);
        let draft = self.read_document::<TemplateDocument>(&draft_path).await;
        let published = self
            .read_document::<TemplateDocument>(&published_path)
            .await;

        let stored = stamped(
            document,
            next_publish_version(document, draft.as_ref(), published.as_ref()),
        );
        self.write_document(&published_path, &stored).await?;
        self.write_document(&draft_path, &stored).await?;
        Ok(stored)
    }

    async fn get_global_settings(&self) -> Result<Option<ThemeTokens>> {
        Ok(self.read_document(&self.root.join(GLOBAL_DOC)).await)
    }

    async fn save_global_settings(&self, settings: &ThemeTokens) -> Result<()> {
        self.write_document(&self.root.join(GLOBAL_DOC), settings)
            .await
    }
}
