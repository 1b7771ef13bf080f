//! Storage driver abstraction for draft/published persistence
//!
//! `StorageDriver` is a capability interface, not a concrete backend: the
//! same contract is satisfied by an in-memory key/value map, a file-backed
//! key/value store, a REST API, and a document-collection pair. The editing
//! core stays agnostic to which one is wired in.
//!
//! # Read/write semantics
//!
//! - Reads return `Ok(None)` when nothing has been stored yet; "not found"
//!   is not an error. Backend read failures also degrade to `Ok(None)` with
//!   a logged warning, so a flaky backend presents as an empty slate rather
//!   than a broken editor.
//! - Writes (`save_draft`, `publish`, `save_global_settings`) propagate
//!   failures as [`StoreError::Persistence`].
//! - The version bump lives in the storage layer: drivers stamp the stored
//!   document from the highest version already persisted, so stale
//!   in-memory callers can never make the persisted version go backwards.

use crate::{Result, StoreError, TemplateExport};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use template_model::{TemplateDocument, ThemeTokens};

/// Key under which a page's draft is stored in key/value backends
pub(crate) fn draft_key(id: &str) -> String {
    format!("draft:{id}")
}

/// Key under which a page's published snapshot is stored in key/value backends
pub(crate) fn published_key(id: &str) -> String {
    format!("published:{id}")
}

/// Key under which the global theme tokens are stored in key/value backends
pub(crate) const GLOBAL_KEY: &str = "global";

/// Copy a document with the given version and a fresh update timestamp
pub(crate) fn stamped(document: &TemplateDocument, version: u64) -> TemplateDocument {
    let mut stored = document.clone();
    stored.version = version;
    stored.updated_at = Utc::now();
    stored
}

/// Next version for a draft write, derived from what is already stored
pub(crate) fn next_draft_version(
    incoming: &TemplateDocument,
    existing_draft: Option<&TemplateDocument>,
) -> u64 {
    existing_draft
        .map(|d| d.version)
        .unwrap_or(0)
        .max(incoming.version)
        + 1
}

/// Next version for a publish, derived from both stored scopes
pub(crate) fn next_publish_version(
    incoming: &TemplateDocument,
    existing_draft: Option<&TemplateDocument>,
    existing_published: Option<&TemplateDocument>,
) -> u64 {
    existing_draft
        .map(|d| d.version)
        .unwrap_or(0)
        .max(existing_published.map(|d| d.version).unwrap_or(0))
        .max(incoming.version)
        + 1
}

/// Pluggable persistence backend for template documents and global theme
/// tokens.
///
/// Implementations are thread-safe (`&self` methods over internal locking)
/// and shared behind `Arc<dyn StorageDriver>`.
#[async_trait]
pub trait StorageDriver: Send + Sync {
    /// Load the draft document for a page, or `None` when none exists
    async fn get_draft(&self, id: &str) -> Result<Option<TemplateDocument>>;

    /// Persist a draft. Bumps the version and update timestamp and returns
    /// the document as stored.
    async fn save_draft(&self, id: &str, document: &TemplateDocument)
        -> Result<TemplateDocument>;

    /// Load the published document for a page, or `None` when none exists
    async fn get_published(&self, id: &str) -> Result<Option<TemplateDocument>>;

    /// Publish a document: the single synchronization point that writes the
    /// published scope AND overwrites the draft scope with the identical
    /// snapshot. Returns the document as stored.
    async fn publish(&self, id: &str, document: &TemplateDocument) -> Result<TemplateDocument>;

    /// Load the global theme tokens, or `None` when none have been saved
    async fn get_global_settings(&self) -> Result<Option<ThemeTokens>>;

    /// Persist the global theme tokens
    async fn save_global_settings(&self, settings: &ThemeTokens) -> Result<()>;

    /// Serialize `{ template, globalSettings, exportedAt, version }` for the
    /// page's draft as JSON text.
    async fn export_template(&self, id: &str) -> Result<String> {
        let template = self
            .get_draft(id)
            .await?
            .ok_or_else(|| StoreError::Validation(format!("no draft to export: {id}")))?;
        let global_settings = self.get_global_settings().await?;
        let export = TemplateExport::new(template, global_settings);
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Parse an export payload, validate it, persist it as the page's draft,
    /// and return the imported document.
    ///
    /// Requires `template.id` (a string) and `template.sections` (a
    /// sequence) to be present, otherwise rejects with
    /// [`StoreError::Validation`]. When global settings are included they
    /// are persisted as a side effect.
    async fn import_template(&self, payload: &str) -> Result<TemplateDocument> {
        let raw: Value = serde_json::from_str(payload)
            .map_err(|e| StoreError::Validation(format!("invalid import payload: {e}")))?;

        let template = raw
            .get("template")
            .ok_or_else(|| StoreError::Validation("import payload has no template".into()))?;
        let id = template
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Validation("template.id is required".into()))?
            .to_string();
        if !template.get("sections").is_some_and(Value::is_array) {
            return Err(StoreError::Validation(
                "template.sections must be a sequence".into(),
            ));
        }

        let document: TemplateDocument = serde_json::from_value(template.clone())
            .map_err(|e| StoreError::Validation(format!("malformed template: {e}")))?;

        if let Some(settings) = raw.get("globalSettings").filter(|v| !v.is_null()) {
            let theme: ThemeTokens = serde_json::from_value(settings.clone())
                .map_err(|e| StoreError::Validation(format!("malformed globalSettings: {e}")))?;
            self.save_global_settings(&theme).await?;
        }

        self.save_draft(&id, &document).await
    }
}
