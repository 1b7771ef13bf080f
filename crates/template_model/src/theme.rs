//! Theme tokens - colors, typography, spacing, and layout flags
//!
//! Theme tokens exist in two scopes: one global set shared by every template,
//! and an overridable copy embedded in each document. The storage layer is
//! responsible for keeping the global copy; the embedded copy travels with
//! the document.

use serde::{Deserialize, Serialize};

/// Color palette tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTokens {
    /// Primary brand color (hex)
    pub primary: String,
    /// Secondary accent color (hex)
    pub secondary: String,
    /// Page background color (hex)
    pub background: String,
    /// Default text color (hex)
    pub text: String,
}

impl Default for ColorTokens {
    fn default() -> Self {
        Self {
            primary: "#1a73e8".to_string(),
            secondary: "#f4b400".to_string(),
            background: "#ffffff".to_string(),
            text: "#202124".to_string(),
        }
    }
}

/// Typography tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyTokens {
    /// Font family for headings
    pub heading_font: String,
    /// Font family for body text
    pub body_font: String,
    /// Base font size in pixels
    pub base_size: f32,
    /// Heading scale ratio applied per heading level
    pub scale_ratio: f32,
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            heading_font: "Inter".to_string(),
            body_font: "Inter".to_string(),
            base_size: 16.0,
            scale_ratio: 1.25,
        }
    }
}

/// Spacing scale in pixels, smallest step first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingScale {
    pub steps: Vec<f32>,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            steps: vec![4.0, 8.0, 16.0, 24.0, 32.0, 48.0, 64.0],
        }
    }
}

/// Theme tokens shared across templates and embedded per-document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeTokens {
    /// Color palette
    pub colors: ColorTokens,
    /// Typography settings
    pub typography: TypographyTokens,
    /// Spacing scale
    pub spacing: SpacingScale,
    /// Corner radius in pixels applied to cards and buttons
    pub corner_radius: f32,
    /// Whether the dark color scheme is active
    pub dark_mode: bool,
    /// Whether layout flows right-to-left
    pub rtl: bool,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            colors: ColorTokens::default(),
            typography: TypographyTokens::default(),
            spacing: SpacingScale::default(),
            corner_radius: 8.0,
            dark_mode: false,
            rtl: false,
        }
    }
}
