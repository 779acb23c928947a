//! Annotation pass: debug markers and template preview outlines
//!
//! Annotations read the same layout as the content pass and are written to
//! the overlay layer, so they always sit on top of card content.

use crate::layout::{AttachOutcome, CardLayout, ItemIdx, ItemPlacement, NodeRef, Point, Rect, SectionIdx};
use crate::model::{Item, Selection};
use crate::theme::Theme;

use super::svg::{attr, num_attr, Layer, SvgBuilder};

const SELECTION_STROKE_WIDTH: f64 = 2.5;
const SECTION_SELECTION_OPACITY: f64 = 0.08;
const ITEM_SELECTION_OPACITY: f64 = 0.15;

/// Outline style for one annotated node
struct Outline<'t> {
    stroke: &'t str,
    stroke_width: f64,
    fill: &'t str,
    fill_opacity: Option<f64>,
}

impl<'t> Outline<'t> {
    fn plain(stroke: &'t str) -> Self {
        Self {
            stroke,
            stroke_width: 1.0,
            fill: "none",
            fill_opacity: None,
        }
    }

    fn selected(theme: &'t Theme, opacity: f64) -> Self {
        Self {
            stroke: &theme.palette.selection,
            stroke_width: SELECTION_STROKE_WIDTH,
            fill: &theme.palette.selection,
            fill_opacity: Some(opacity),
        }
    }

    fn styles(&self) -> String {
        let mut styles = [
            attr("fill", self.fill),
            attr("stroke", self.stroke),
            num_attr("stroke-width", self.stroke_width),
        ]
        .concat();
        if let Some(opacity) = self.fill_opacity {
            styles.push_str(&num_attr("fill-opacity", opacity));
        }
        styles
    }
}

fn label_styles(font_size: f64, fill: &str, theme: &Theme) -> String {
    [
        num_attr("font-size", font_size),
        attr("fill", fill),
        attr("font-family", &theme.typography.body),
    ]
    .concat()
}

fn render_anchor_grid(builder: &mut SvgBuilder, rect: Rect, radius: f64, fill: &str) {
    let styles = attr("fill", fill);
    for point in rect.anchor_grid() {
        builder.add_circle(point, radius, "anchor-grid", &styles);
    }
}

/// Draw the attach connector for one item, or a label when it fell back
fn render_attachment(builder: &mut SvgBuilder, item: &Item, placement: &ItemPlacement, theme: &Theme) {
    let item_point = placement.rect.anchor_point(item.anchor);
    let label_at = item_point.offset(8.0, 4.0);
    let alert = &theme.palette.alert;

    if let AttachOutcome::MissingTarget { .. } = placement.outcome {
        if let Some(text) = placement.outcome.annotation() {
            builder.add_text(None, &text, label_at, "missing", &label_styles(12.0, alert, theme));
        }
        return;
    }

    let target_point = placement.target_rect.anchor_point(item.attach.anchor);
    render_connector(builder, item_point, target_point, theme);

    if let Some(text) = placement.outcome.annotation() {
        builder.add_text(None, &text, label_at, "cycle", &label_styles(12.0, alert, theme));
    }
}

fn render_connector(builder: &mut SvgBuilder, from: Point, to: Point, theme: &Theme) {
    let alert = &theme.palette.alert;
    builder.add_line(
        from,
        to,
        "connector",
        &[attr("stroke", alert), num_attr("stroke-width", 1.5)].concat(),
    );
    builder.add_circle(
        to,
        8.0,
        "attach-point",
        &[attr("fill", "none"), attr("stroke", alert), num_attr("stroke-width", 3.0)].concat(),
    );
    builder.add_circle(
        from,
        6.0,
        "item-anchor",
        &[
            attr("fill", &theme.palette.anchor),
            attr("stroke", "#ffffff"),
            num_attr("stroke-width", 1.0),
        ]
        .concat(),
    );
}

/// Debug annotations for a rendered card
pub fn render_debug_overlay(builder: &mut SvgBuilder, layout: &CardLayout<'_>, theme: &Theme) {
    builder.set_layer(Layer::Overlay);
    builder.start_group(None, &["debug"]);

    builder.add_text(
        None,
        "DEBUG RENDER",
        Point::new(24.0, 36.0),
        "debug-caption",
        &label_styles(20.0, &theme.palette.alert, theme),
    );

    let muted = &theme.palette.muted;
    for (entry, placement) in layout.index.items.iter().zip(&layout.items) {
        let outline = Outline::plain(muted);
        builder.add_rect(None, placement.rect, 10.0, "item-outline", &outline.styles());
        render_anchor_grid(builder, placement.rect, 3.0, muted);
        render_attachment(builder, entry.item, placement, theme);
    }

    builder.end_group();
    builder.set_layer(Layer::Content);
}

/// Structure-only annotations for a template preview
pub fn render_preview_overlay(
    builder: &mut SvgBuilder,
    layout: &CardLayout<'_>,
    theme: &Theme,
    selection: Option<&Selection>,
) {
    let selected = selection.and_then(|s| {
        let found = layout.index.lookup(s.kind, &s.id);
        if found.is_none() {
            log::debug!("selected {}:{} is not in the template", s.kind, s.id);
        }
        found
    });

    builder.set_layer(Layer::Overlay);
    builder.start_group(None, &["preview"]);

    let muted = &theme.palette.muted;
    for (i, section) in layout.index.sections.iter().enumerate() {
        let rect = layout.section_rect(SectionIdx(i));
        let outline = if selected == Some(NodeRef::Section(SectionIdx(i))) {
            Outline::selected(theme, SECTION_SELECTION_OPACITY)
        } else {
            Outline::plain(muted)
        };
        let styles = format!("{}{}", outline.styles(), attr("stroke-dasharray", "6 6"));
        builder.add_rect(Some(&section.id), rect, 12.0, "section-outline", &styles);
        builder.add_text(
            None,
            section.label(),
            Point::new(rect.x + 8.0, rect.y + 18.0),
            "section-label",
            &label_styles(12.0, muted, theme),
        );
        render_anchor_grid(builder, rect, 3.0, muted);
    }

    let ink = &theme.palette.ink;
    for (i, (entry, placement)) in layout.index.items.iter().zip(&layout.items).enumerate() {
        let rect = placement.rect;
        let outline = if selected == Some(NodeRef::Item(ItemIdx(i))) {
            Outline::selected(theme, ITEM_SELECTION_OPACITY)
        } else {
            Outline::plain(ink)
        };
        builder.add_rect(Some(&entry.item.id), rect, 10.0, "item-outline", &outline.styles());
        builder.add_text(
            None,
            entry.item.label(),
            Point::new(rect.x + 6.0, rect.y + 16.0),
            "item-label",
            &label_styles(11.0, ink, theme),
        );
        render_anchor_grid(builder, rect, 2.5, ink);
        render_attachment(builder, entry.item, placement, theme);
    }

    builder.end_group();
    builder.set_layer(Layer::Content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute;
    use crate::model::{AnchorPoint, Attach, Section, SectionLayout, Template};
    use crate::renderer::SvgConfig;

    fn template() -> Template {
        Template::new(
            "t",
            Section::new("root", SectionLayout::Column)
                .with_child(
                    Section::new("header", SectionLayout::Stack)
                        .with_item(Item::text("title", "name")),
                )
                .with_child(
                    Section::new("body", SectionLayout::Stack).with_item(
                        Item::frame("ghosted").with_attach(Attach::item("ghost", AnchorPoint::CENTER)),
                    ),
                ),
        )
        .with_canvas(200.0, 200.0, 0.0)
    }

    fn preview(selection: Option<&Selection>) -> String {
        let template = template();
        let layout = compute(&template);
        let mut builder = SvgBuilder::new(SvgConfig::default());
        render_preview_overlay(&mut builder, &layout, &Theme::default(), selection);
        builder.build(200.0, 200.0)
    }

    #[test]
    fn test_debug_overlay_marks_missing_target() {
        let template = template();
        let layout = compute(&template);
        let mut builder = SvgBuilder::new(SvgConfig::default());
        render_debug_overlay(&mut builder, &layout, &Theme::default());
        let svg = builder.build(200.0, 200.0);

        assert!(svg.contains(">DEBUG RENDER</text>"));
        assert!(svg.contains(">missing item:ghost</text>"));
        // only the attached title gets a connector
        assert_eq!(svg.matches("card-connector").count(), 1);
        assert_eq!(svg.matches("card-anchor-grid").count(), 18);
    }

    #[test]
    fn test_preview_outlines_every_node() {
        let svg = preview(None);
        assert_eq!(svg.matches("card-section-outline").count(), 3);
        assert_eq!(svg.matches("card-item-outline").count(), 2);
        assert!(svg.contains(r#"stroke-dasharray="6 6""#));
        assert!(svg.contains(">header</text>"));
        assert!(svg.contains(">title</text>"));
        assert!(!svg.contains("fill-opacity"));
        assert!(!svg.contains("DEBUG RENDER"));
    }

    #[test]
    fn test_preview_highlights_selected_section() {
        let svg = preview(Some(&Selection::section("body")));
        assert_eq!(svg.matches(r#"fill-opacity="0.08""#).count(), 1);
        let line = svg
            .lines()
            .find(|l| l.contains(r#"id="body""#))
            .expect("body outline");
        assert!(line.contains(r##"stroke="#c65a32""##));
        assert!(line.contains(r#"stroke-width="2.5""#));
    }

    #[test]
    fn test_preview_highlights_selected_item() {
        let svg = preview(Some(&Selection::item("title")));
        assert_eq!(svg.matches(r#"fill-opacity="0.15""#).count(), 1);
    }

    #[test]
    fn test_unknown_selection_highlights_nothing() {
        let svg = preview(Some(&Selection::item("body")));
        assert!(!svg.contains("fill-opacity"));
    }
}
