//! Cardsmith - a template layout and rendering engine for cards
//!
//! A template is a tree of proportionally sized sections holding text, frame
//! and image items. Items are pinned by anchor points to any section or item
//! in the template. This library resolves that tree to absolute rectangles
//! and renders it, bound to one card's data, as SVG.
//!
//! # Example
//!
//! ```rust
//! use cardsmith::{render_card, CardData, Template};
//!
//! let card = CardData::new("c1", "Ember Smith");
//! let svg = render_card(&Template::default(), &card);
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("Ember Smith"));
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod theme;

pub use error::InputError;
pub use layout::{compute, resolve_items, resolve_sections, CardLayout, Rect};
pub use model::{CardData, Item, ItemKind, Section, SectionLayout, Selection, Template};
pub use renderer::{render_card_svg, render_preview_svg, SvgConfig};
pub use theme::{Theme, ThemeError};

use thiserror::Error;

/// Errors that can occur in the JSON entry points
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template or card could not be decoded
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Palette and typography
    pub theme: Theme,
    /// Debug mode: outline items and mark their anchors and attach points
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render a card with default configuration
///
/// This is the main entry point for the library. It lays out the template,
/// binds the card's fields and generates SVG output.
pub fn render_card(template: &Template, card: &CardData) -> String {
    render_card_with_config(template, card, &RenderConfig::default())
}

/// Render a card with custom configuration
///
/// # Example
///
/// ```rust
/// use cardsmith::{render_card_with_config, CardData, RenderConfig, SvgConfig, Template};
///
/// let config = RenderConfig::new()
///     .with_svg(SvgConfig::inline())
///     .with_debug(true);
///
/// let svg = render_card_with_config(&Template::default(), &CardData::default(), &config);
/// assert!(svg.contains("DEBUG RENDER"));
/// ```
pub fn render_card_with_config(template: &Template, card: &CardData, config: &RenderConfig) -> String {
    render_card_svg(template, card, &config.svg, &config.theme, config.debug)
}

/// Render a template preview with default configuration
///
/// The preview shows sections and items as labelled outlines, without card
/// content. A selected node is highlighted.
pub fn render_template_preview(template: &Template, selection: Option<&Selection>) -> String {
    render_template_preview_with_config(template, selection, &RenderConfig::default())
}

/// Render a template preview with custom configuration
pub fn render_template_preview_with_config(
    template: &Template,
    selection: Option<&Selection>,
    config: &RenderConfig,
) -> String {
    render_preview_svg(template, selection, &config.svg, &config.theme)
}

/// Decode a template and a card from JSON and render the card
///
/// # Example
///
/// ```rust
/// use cardsmith::{render_card_json, RenderConfig};
///
/// let template = r#"{ "root": { "id": "root", "items": [{ "id": "t", "fieldId": "name" }] } }"#;
/// let card = r#"{ "id": "c1", "name": "Salt & Iron" }"#;
///
/// let svg = render_card_json(template, card, &RenderConfig::default()).unwrap();
/// assert!(svg.contains("Salt &amp; Iron"));
/// ```
pub fn render_card_json(
    template_json: &str,
    card_json: &str,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let template = Template::from_json(template_json)?;
    let card = CardData::from_json(card_json)?;
    Ok(render_card_with_config(&template, &card, config))
}

/// Decode a template from JSON and render its preview
pub fn render_template_preview_json(
    template_json: &str,
    selection: Option<&Selection>,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let template = Template::from_json(template_json)?;
    Ok(render_template_preview_with_config(&template, selection, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnchorPoint, Attach};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_render_default_template() {
        init_logger();
        let svg = render_card(&Template::default(), &CardData::new("c", "Ember Smith"));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 750 1050""#));
        assert!(svg.contains(r##"fill="#f6f1e9""##));
        assert!(svg.contains(">Ember Smith</text>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_with_custom_theme() {
        let mut theme = Theme::default();
        theme.palette.paper = "#000000".to_string();
        let config = RenderConfig::new().with_theme(theme);
        let svg = render_card_with_config(&Template::default(), &CardData::default(), &config);
        assert!(svg.contains(r##"fill="#000000""##));
    }

    #[test]
    fn test_debug_mode_adds_overlay() {
        let config = RenderConfig::new().with_debug(true);
        let plain = render_card(&Template::default(), &CardData::default());
        let debug = render_card_with_config(&Template::default(), &CardData::default(), &config);
        assert!(!plain.contains("card-debug"));
        assert!(debug.contains("card-debug"));
        assert!(debug.contains("DEBUG RENDER"));
    }

    #[test]
    fn test_preview_has_no_content() {
        let template = Template::default();
        let svg = render_template_preview(&template, None);
        assert!(svg.contains("card-preview"));
        assert!(svg.contains(">Header</text>"));
        assert!(!svg.contains("card-text"));
    }

    #[test]
    fn test_missing_target_is_not_an_error() {
        let template = Template::new(
            "t",
            Section::new("root", SectionLayout::Stack).with_item(
                Item::frame("f").with_attach(Attach::item("ghost", AnchorPoint::CENTER)),
            ),
        );
        let config = RenderConfig::new().with_debug(true);
        let svg = render_card_with_config(&template, &CardData::default(), &config);
        assert!(svg.contains("missing item:ghost"));
    }

    #[test]
    fn test_json_entry_points() {
        let template = r#"{ "id": "t", "root": { "id": "root" } }"#;
        assert!(render_card_json(template, r#"{ "id": "c" }"#, &RenderConfig::default()).is_ok());
        assert!(render_template_preview_json(template, None, &RenderConfig::default()).is_ok());

        let err = render_card_json("{ nope", "{}", &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid template JSON"));
        let err = render_card_json(template, "[1, 2", &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid card JSON"));
    }
}
