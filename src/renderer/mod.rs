//! SVG renderer for cards and template previews
//!
//! Rendering is split in two passes over the same layout: the content pass
//! draws card data, and the annotation pass adds editor-only markup on top.

pub mod card;
pub mod config;
pub mod overlay;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{escape_xml, fmt_num, SvgBuilder};

use crate::layout::{canvas_rect, compute};
use crate::model::{CardData, Selection, Template};
use crate::theme::Theme;

use card::{render_background, render_items};
use overlay::{render_debug_overlay, render_preview_overlay};

/// Render a card bound to `template`, optionally with debug annotations
pub fn render_card_svg(
    template: &Template,
    card: &CardData,
    config: &SvgConfig,
    theme: &Theme,
    debug: bool,
) -> String {
    let layout = compute(template);
    let mut builder = SvgBuilder::new(config.clone());

    let canvas = canvas_rect(template);
    render_background(&mut builder, canvas, template.corner_radius, theme);
    render_items(&mut builder, &layout, card, theme);
    if debug {
        render_debug_overlay(&mut builder, &layout, theme);
    }

    log::debug!(
        "rendered card '{}' with template '{}'{}",
        card.id,
        template.id,
        if debug { " (debug)" } else { "" }
    );
    builder.build(canvas.width, canvas.height)
}

/// Render the structure of `template`, highlighting `selection` if given
pub fn render_preview_svg(
    template: &Template,
    selection: Option<&Selection>,
    config: &SvgConfig,
    theme: &Theme,
) -> String {
    let layout = compute(template);
    let mut builder = SvgBuilder::new(config.clone());

    let canvas = canvas_rect(template);
    render_background(&mut builder, canvas, template.corner_radius, theme);
    render_preview_overlay(&mut builder, &layout, theme, selection);

    log::debug!("rendered preview of template '{}'", template.id);
    builder.build(canvas.width, canvas.height)
}
