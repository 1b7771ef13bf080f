//! Storage service facade
//!
//! Wraps one selected [`StorageDriver`] and adds the derived operations the
//! editing surface needs: unsaved-changes detection, an aggregated status
//! view, and reset-to-published.

use crate::{Result, StorageDriver};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use template_model::{TemplateDocument, ThemeTokens};

/// Aggregated persistence status for one template, for display in the
/// editor's header/status bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStatus {
    /// Whether a draft document exists
    pub draft_exists: bool,
    /// Whether a published document exists
    pub published_exists: bool,
    /// Whether draft and published differ (see `has_unsaved_changes`)
    pub has_unsaved_changes: bool,
    /// Last draft write time
    pub draft_updated_at: Option<DateTime<Utc>>,
    /// Last publish time
    pub published_updated_at: Option<DateTime<Utc>>,
}

/// Facade over a single storage driver
pub struct StorageService {
    driver: Arc<dyn StorageDriver>,
}

impl StorageService {
    /// Create a service over the selected driver
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Load the draft document, or `None` when none exists
    pub async fn get_draft(&self, id: &str) -> Result<Option<TemplateDocument>> {
        self.driver.get_draft(id).await
    }

    /// Load the draft document, falling back to the starter template when
    /// nothing has been saved yet
    pub async fn get_draft_or_starter(&self, id: &str) -> Result<TemplateDocument> {
        Ok(self
            .driver
            .get_draft(id)
            .await?
            .unwrap_or_else(|| TemplateDocument::starter(id)))
    }

    /// Persist the draft; returns the stored document with its bumped version
    pub async fn save_draft(
        &self,
        id: &str,
        document: &TemplateDocument,
    ) -> Result<TemplateDocument> {
        self.driver.save_draft(id, document).await
    }

    /// Load the published document, or `None` when none exists
    pub async fn get_published(&self, id: &str) -> Result<Option<TemplateDocument>> {
        self.driver.get_published(id).await
    }

    /// Publish the document: writes the published scope and overwrites the
    /// draft with the identical snapshot
    pub async fn publish(
        &self,
        id: &str,
        document: &TemplateDocument,
    ) -> Result<TemplateDocument> {
        self.driver.publish(id, document).await
    }

    /// Load the global theme tokens
    pub async fn get_global_settings(&self) -> Result<Option<ThemeTokens>> {
        self.driver.get_global_settings().await
    }

    /// Persist the global theme tokens
    pub async fn save_global_settings(&self, settings: &ThemeTokens) -> Result<()> {
        self.driver.save_global_settings(settings).await
    }

    /// Export the page's draft and global settings as JSON text
    pub async fn export_template(&self, id: &str) -> Result<String> {
        self.driver.export_template(id).await
    }

    /// Import an export payload, persisting it as the page's draft
    pub async fn import_template(&self, payload: &str) -> Result<TemplateDocument> {
        self.driver.import_template(payload).await
    }

    /// Whether the stored draft differs from the stored published snapshot.
    ///
    /// True when exactly one of the two exists, or when both exist and
    /// differ in version, serialized sections, or serialized theme tokens.
    /// False only when both are absent or structurally identical.
    pub async fn has_unsaved_changes(&self, id: &str) -> Result<bool> {
        let draft = self.driver.get_draft(id).await?;
        let published = self.driver.get_published(id).await?;
        Ok(match (draft, published) {
            (None, None) => false,
            (Some(_), None) | (None, Some(_)) => true,
            (Some(draft), Some(published)) => {
                draft.version != published.version
                    || serde_json::to_string(&draft.sections)?
                        != serde_json::to_string(&published.sections)?
                    || serde_json::to_string(&draft.theme)?
                        != serde_json::to_string(&published.theme)?
            }
        })
    }

    /// Aggregate existence flags, the dirty comparison, and both timestamps
    pub async fn template_status(&self, id: &str) -> Result<TemplateStatus> {
        let draft = self.driver.get_draft(id).await?;
        let published = self.driver.get_published(id).await?;
        let has_unsaved_changes = self.has_unsaved_changes(id).await?;
        Ok(TemplateStatus {
            draft_exists: draft.is_some(),
            published_exists: published.is_some(),
            has_unsaved_changes,
            draft_updated_at: draft.map(|d| d.updated_at),
            published_updated_at: published.map(|d| d.updated_at),
        })
    }

    /// Overwrite the draft with the published snapshot (one-way, never a
    /// merge). Implemented as a republish of the published document, which
    /// reuses the driver's single draft := published synchronization point.
    /// Returns the restored document, or `None` when nothing is published.
    pub async fn reset_to_published(&self, id: &str) -> Result<Option<TemplateDocument>> {
        match self.driver.get_published(id).await? {
            Some(published) => Ok(Some(self.driver.publish(id, &published).await?)),
            None => Ok(None),
        }
    }
}
