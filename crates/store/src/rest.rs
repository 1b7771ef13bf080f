//! REST API storage driver
//!
//! Talks to a template service over HTTP:
//!
//! - `GET/PUT /templates/{id}/draft`
//! - `GET /templates/{id}/published`
//! - `PUT /templates/{id}/publish`
//! - `GET/PUT /settings/global`
//!
//! The publish endpoint performs the draft := published synchronization
//! server-side; this driver sends one request per operation. Mutating calls
//! carry a bearer credential when one is configured. A 404 on any read maps
//! to `None`; other read failures degrade to `None` with a logged warning.

use crate::driver::{next_draft_version, next_publish_version, stamped};
use crate::{Result, StorageDriver, StoreError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use template_model::{TemplateDocument, ThemeTokens};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of [`StorageDriver`]
pub struct RestDriver {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestDriver {
    /// Create a driver against the given base URL (no trailing slash needed)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Attach the bearer credential sent with mutating calls
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn template_url(&self, id: &str, scope: &str) -> String {
        format!(
            "{}/templates/{}/{scope}",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    fn settings_url(&self) -> String {
        format!("{}/settings/global", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let response = match self.client.get(url).timeout(DEFAULT_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("read from {url} failed: {e}");
                return None;
            }
        };
        if response.status() == StatusCode::NOT_FOUND {
            return None;
        }
        if !response.status().is_success() {
            tracing::warn!("read from {url} returned {}", response.status());
            return None;
        }
        match response.json().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("unreadable response from {url}: {e}");
                None
            }
        }
    }

    async fn put_json<T: Serialize>(&self, url: &str, body: &T) -> Result<()> {
        let mut request = self.client.put(url).timeout(DEFAULT_TIMEOUT).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Persistence(format!(
                "PUT {url} returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageDriver for RestDriver {
    async fn get_draft(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self.get_json(&self.template_url(id, "draft")).await)
    }

    async fn save_draft(
        &self,
        id: &str,
        document: &TemplateDocument,
    ) -> Result<TemplateDocument> {
        let existing = self
            .get_json::<TemplateDocument>(&self.template_url(id, "draft"))
            .await;
        let stored = stamped(document, next_draft_version(document, existing.as_ref()));
        self.put_json(&self.template_url(id, "draft"), &stored)
            .await?;
        Ok(stored)
    }

    async fn get_published(&self, id: &str) -> Result<Option<TemplateDocument>> {
        Ok(self.get_json(&self.template_url(id, "published")).await)
    }

    async fn publish(&self, id: &str, document: &TemplateDocument) -> Result<TemplateDocument> {
        let draft = self
            .get_json::<TemplateDocument>(&self.template_url(id, "draft"))
            .await;
        let published = self
            .get_json::<TemplateDocument>(&self.template_url(id, "published"))
            .await;
        let stored = stamped(
            document,
            next_publish_version(document, draft.as_ref(), published.as_ref()),
        );
        self.put_json(&self.template_url(id, "publish"), &stored)
            .await?;
        Ok(stored)
    }

    async fn get_global_settings(&self) -> Result<Option<ThemeTokens>> {
        Ok(self.get_json(&self.settings_url()).await)
    }

    async fn save_global_settings(&self, settings: &ThemeTokens) -> Result<()> {
        self.put_json(&self.settings_url(), settings).await
    }
}
