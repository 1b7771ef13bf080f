//! Autosave scheduler
//!
//! A single recurring timer that persists the current draft through the
//! [`StorageService`] whenever the dirty flag is set. The scheduler is an
//! owned object with explicit `start`/`stop`; starting while already
//! running is a no-op, so at most one timer task exists at a time. A save
//! mutex serializes timer ticks against manual saves, and a change counter
//! keeps a save that raced a newer mutation from clearing the dirty flag.
//!
//! Tick failures are logged and left for the next natural tick; only the
//! explicit `save_now` path propagates errors to the caller.

use crate::{Result, StorageService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use template_model::TemplateDocument;
use tokio::task::JoinHandle;

/// Autosave configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Whether autosave is enabled
    pub enabled: bool,
    /// Interval between ticks in seconds (default: 30)
    pub interval_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

impl AutosaveConfig {
    /// Create a config with a custom interval
    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    /// Create a config with autosave disabled
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Current autosave status for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveStatus {
    /// Whether autosave is enabled
    pub enabled: bool,
    /// Whether there are unsaved changes
    pub has_unsaved_changes: bool,
    /// Whether a save is currently in progress
    pub is_saving: bool,
    /// Timestamp of the last successful save
    pub last_saved: Option<DateTime<Utc>>,
    /// Error message from the last failed save attempt, if any
    pub last_error: Option<String>,
}

/// The draft currently open in the editing surface.
///
/// The surface keeps this handle current after every mutation; the
/// scheduler reads it at tick time.
#[derive(Debug, Clone)]
pub struct CurrentDraft {
    /// Page / template identifier
    pub id: String,
    /// The in-memory document to persist
    pub document: Arc<TemplateDocument>,
}

/// Shared handle between the editing surface and the scheduler
pub type DraftHandle = Arc<tokio::sync::RwLock<Option<CurrentDraft>>>;

/// Create an empty draft handle
pub fn draft_handle() -> DraftHandle {
    Arc::new(tokio::sync::RwLock::new(None))
}

/// Dirty-flag-gated background persistence of the draft
pub struct AutosaveScheduler {
    config: AutosaveConfig,
    service: Arc<StorageService>,
    draft: DraftHandle,
    /// Whether the in-memory draft differs from the last persisted one
    dirty: Arc<AtomicBool>,
    /// Bumped on every mark_dirty; lets a completed save detect that a
    /// newer mutation arrived while it was in flight
    changes: Arc<AtomicU64>,
    saving: Arc<AtomicBool>,
    last_saved: Arc<RwLock<Option<DateTime<Utc>>>>,
    last_error: Arc<RwLock<Option<String>>>,
    /// Serializes timer ticks against manual saves
    save_lock: Arc<tokio::sync::Mutex<()>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AutosaveScheduler {
    /// Create a scheduler over the given service and draft handle
    pub fn new(service: Arc<StorageService>, draft: DraftHandle, config: AutosaveConfig) -> Self {
        Self {
            config,
            service,
            draft,
            dirty: Arc::new(AtomicBool::new(false)),
            changes: Arc::new(AtomicU64::new(0)),
            saving: Arc::new(AtomicBool::new(false)),
            last_saved: Arc::new(RwLock::new(None)),
            last_error: Arc::new(RwLock::new(None)),
            save_lock: Arc::new(tokio::sync::Mutex::new(())),
            task: Mutex::new(None),
        }
    }

    /// The configuration in effect
    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    /// The draft handle the editing surface keeps current
    pub fn draft_handle(&self) -> DraftHandle {
        Arc::clone(&self.draft)
    }

    /// Mark the draft as having unsaved changes
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        self.changes.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Whether a save is currently in progress
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Whether the timer task is running
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    /// Current status snapshot
    pub fn status(&self) -> AutosaveStatus {
        AutosaveStatus {
            enabled: self.config.enabled,
            has_unsaved_changes: self.is_dirty(),
            is_saving: self.is_saving(),
            last_saved: *self.last_saved.read().unwrap(),
            last_error: self.last_error.read().unwrap().clone(),
        }
    }

    /// Start the recurring timer. Idempotent: a running scheduler is left
    /// untouched. Disabled configs never start.
    pub fn start(self: &Arc<Self>) {
        if !self.config.enabled {
            return;
        }
        let mut slot = self.task.lock().unwrap();
        if slot.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }
        let scheduler = Arc::clone(self);
        let interval = Duration::from_secs(self.config.interval_secs);
        *slot = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                scheduler.tick().await;
            }
        }));
    }

    /// Stop the timer. The dirty flag and status survive for a later start.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
        }
    }

    /// One timer tick: persist when dirty and a draft is loaded. Failures
    /// are logged and retried on the next natural tick.
    async fn tick(&self) {
        if !self.dirty.load(Ordering::SeqCst) {
            return;
        }
        let Some(current) = self.draft.read().await.clone() else {
            return;
        };
        if let Err(e) = self.persist(&current).await {
            tracing::warn!("autosave for {} failed: {e}", current.id);
        }
    }

    /// Explicit manual save sharing the autosave path. Returns `false` when
    /// no draft is loaded; propagates persistence errors to the caller.
    pub async fn save_now(&self) -> Result<bool> {
        let Some(current) = self.draft.read().await.clone() else {
            return Ok(false);
        };
        self.persist(&current).await?;
        Ok(true)
    }

    async fn persist(&self, current: &CurrentDraft) -> Result<()> {
        let _guard = self.save_lock.lock().await;
        let changes_before = self.changes.load(Ordering::SeqCst);
        self.saving.store(true, Ordering::SeqCst);
        let result = self
            .service
            .save_draft(&current.id, &current.document)
            .await;
        self.saving.store(false, Ordering::SeqCst);

        match result {
            Ok(_) => {
                // Only clear dirty if no mutation landed while saving.
                if self.changes.load(Ordering::SeqCst) == changes_before {
                    self.dirty.store(false, Ordering::SeqCst);
                }
                *self.last_saved.write().unwrap() = Some(Utc::now());
                *self.last_error.write().unwrap() = None;
                Ok(())
            }
            Err(e) => {
                *self.last_error.write().unwrap() = Some(e.to_string());
                Err(e)
            }
        }
    }
}
