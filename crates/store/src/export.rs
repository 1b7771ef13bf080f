//! Template export format

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use template_model::{TemplateDocument, ThemeTokens};

/// Export format version
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// The JSON shape produced by `export_template` and accepted by
/// `import_template`: the draft document, the global theme tokens (when
/// present), an export timestamp, and the format version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateExport {
    /// The exported draft document
    pub template: TemplateDocument,
    /// Global theme tokens at export time
    #[serde(rename = "globalSettings", skip_serializing_if = "Option::is_none")]
    pub global_settings: Option<ThemeTokens>,
    /// When the export was taken
    #[serde(rename = "exportedAt")]
    pub exported_at: DateTime<Utc>,
    /// Format version of this payload
    pub version: u32,
}

impl TemplateExport {
    /// Build an export payload for the given draft
    pub fn new(template: TemplateDocument, global_settings: Option<ThemeTokens>) -> Self {
        Self {
            template,
            global_settings,
            exported_at: Utc::now(),
            version: EXPORT_FORMAT_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_round_trip() {
        let export = TemplateExport::new(
            TemplateDocument::starter("home"),
            Some(ThemeTokens::default()),
        );
        let json = serde_json::to_string(&export).unwrap();
        assert!(json.contains("\"globalSettings\""));
        assert!(json.contains("\"exportedAt\""));

        let restored: TemplateExport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.template, export.template);
        assert_eq!(restored.version, EXPORT_FORMAT_VERSION);
    }

    #[test]
    fn test_global_settings_omitted_when_absent() {
        let export = TemplateExport::new(TemplateDocument::new("home"), None);
        let json = serde_json::to_string(&export).unwrap();
        assert!(!json.contains("globalSettings"));
    }
}
