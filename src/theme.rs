//! Theme: palette and typography for rendered cards
//!
//! Themes are plain TOML files. Every key is optional; missing keys fall back
//! to the built-in parchment theme.
//!
//! ```toml
//! [metadata]
//! name = "Night"
//!
//! [palette]
//! paper = "#14161a"
//! ink = "#f2efe9"
//!
//! [typography]
//! title = "'Cinzel', serif"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::FontRole;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Colors used for card content and editor annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Card background
    pub paper: String,
    /// Default text and frame stroke color
    pub ink: String,
    /// Neutral outlines in debug and preview output
    pub muted: String,
    /// Attach-point markers and fallback labels
    pub alert: String,
    /// Item anchor markers
    pub anchor: String,
    /// Highlight for the selected node in previews
    pub selection: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            paper: "#f6f1e9".to_string(),
            ink: "#1b1a17".to_string(),
            muted: "#5f5a53".to_string(),
            alert: "#d64545".to_string(),
            anchor: "#2f6f4e".to_string(),
            selection: "#c65a32".to_string(),
        }
    }
}

/// Font stacks for the two text roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub title: String,
    pub body: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title: "'Fraunces', serif".to_string(),
            body: "'Space Grotesk', sans-serif".to_string(),
        }
    }
}

/// A named palette and typography pair
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub palette: Palette,
    pub typography: Typography,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    palette: Palette,
    #[serde(default)]
    typography: Typography,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl Theme {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;
        let (name, description) = match parsed.metadata {
            Some(meta) => (meta.name, meta.description),
            None => (None, None),
        };

        Ok(Theme {
            name,
            description,
            palette: parsed.palette,
            typography: parsed.typography,
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    /// Font stack for a text role
    pub fn font_family(&self, role: FontRole) -> &str {
        match role {
            FontRole::Title => &self.typography.title,
            FontRole::Body => &self.typography.body,
        }
    }
}
