//! Settings maps for sections and blocks

use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form key/value settings attached to a section or block instance.
///
/// A `BTreeMap` keeps serialization order deterministic, which the storage
/// layer relies on when comparing serialized drafts against published
/// snapshots.
pub type SettingsMap = BTreeMap<String, Value>;

/// Merge a partial settings map into an existing one.
///
/// Keys present in `partial` overwrite existing values; a `null` value
/// removes the key. Returns `true` if anything changed.
pub fn merge_settings(settings: &mut SettingsMap, partial: &SettingsMap) -> bool {
    let mut changed = false;
    for (key, value) in partial {
        if value.is_null() {
            changed |= settings.remove(key).is_some();
        } else if settings.get(key) != Some(value) {
            settings.insert(key.clone(), value.clone());
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, Value)]) -> SettingsMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_merge_overwrites_and_inserts() {
        let mut settings = map(&[("heading", json!("Hello"))]);
        let partial = map(&[("heading", json!("Hi")), ("subheading", json!("There"))]);

        assert!(merge_settings(&mut settings, &partial));
        assert_eq!(settings["heading"], json!("Hi"));
        assert_eq!(settings["subheading"], json!("There"));
    }

    #[test]
    fn test_merge_null_removes() {
        let mut settings = map(&[("heading", json!("Hello"))]);
        let partial = map(&[("heading", Value::Null)]);

        assert!(merge_settings(&mut settings, &partial));
        assert!(settings.is_empty());
    }

    #[test]
    fn test_merge_identical_is_unchanged() {
        let mut settings = map(&[("heading", json!("Hello"))]);
        let partial = map(&[("heading", json!("Hello"))]);

        assert!(!merge_settings(&mut settings, &partial));
    }
}
