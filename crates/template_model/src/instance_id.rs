//! Instance ID generation and management

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-wide counter appended to generated IDs so that two instances
/// created within the same millisecond still get distinct IDs.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a section or block instance.
///
/// IDs are human-readable strings of the form `{type}-{millis}-{seq}`,
/// e.g. `hero-1717430400000-7`. The type prefix keeps serialized documents
/// easy to inspect; the monotonic sequence makes generation collision-free
/// within a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Generate a fresh ID for an instance of the given type tag
    pub fn generate(type_tag: &str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("{type_tag}-{millis}-{seq}"))
    }

    /// Create an ID from an existing string (e.g. a deserialized document)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the type tag prefix of a generated ID, if present
    pub fn type_tag(&self) -> Option<&str> {
        let (prefix, _) = self.0.rsplit_once('-')?;
        let (tag, _) = prefix.rsplit_once('-')?;
        Some(tag)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstanceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for InstanceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for InstanceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
