//! Content pass: text, frames and images bound to card data

use crate::layout::{CardLayout, Rect};
use crate::model::{
    AnchorCoord, CardData, FrameItem, ImageItem, Item, ItemKind, TextAlign, TextItem,
};
use crate::theme::Theme;

use super::svg::{attr, num_attr, SvgBuilder};

/// SVG `text-anchor` for a horizontal alignment
pub fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

/// SVG `dominant-baseline` for the item's vertical anchor
pub fn dominant_baseline(anchor_y: AnchorCoord) -> &'static str {
    match anchor_y {
        AnchorCoord::Start => "hanging",
        AnchorCoord::Middle => "middle",
        AnchorCoord::End => "baseline",
    }
}

/// Draw the canvas background
pub fn render_background(builder: &mut SvgBuilder, canvas: Rect, radius: f64, theme: &Theme) {
    builder.add_rect(
        None,
        canvas,
        radius,
        "background",
        &attr("fill", &theme.palette.paper),
    );
}

/// Draw every item of the layout in traversal order
pub fn render_items(builder: &mut SvgBuilder, layout: &CardLayout<'_>, card: &CardData, theme: &Theme) {
    for (entry, placement) in layout.index.items.iter().zip(&layout.items) {
        render_item(builder, entry.item, placement.rect, card, theme);
    }
}

fn render_item(builder: &mut SvgBuilder, item: &Item, rect: Rect, card: &CardData, theme: &Theme) {
    match &item.kind {
        ItemKind::Text(text) => render_text(builder, item, text, rect, card, theme),
        ItemKind::Frame(frame) => render_frame(builder, item, frame, rect, theme),
        ItemKind::Image(image) => render_image(builder, item, image, rect, card),
    }
}

fn render_text(
    builder: &mut SvgBuilder,
    item: &Item,
    text: &TextItem,
    rect: Rect,
    card: &CardData,
    theme: &Theme,
) {
    let value = card.text_value(&text.field_id);
    if value.is_empty() {
        return;
    }

    // The text is positioned on its own anchor point, which is the attach point
    let at = rect.anchor_point(item.anchor);
    let fill = text.color.as_deref().unwrap_or(&theme.palette.ink);
    let styles = [
        attr("text-anchor", text_anchor(text.align)),
        attr("dominant-baseline", dominant_baseline(item.anchor.y)),
        attr("font-family", theme.font_family(text.font)),
        num_attr("font-size", text.font_size),
        attr("fill", fill),
    ]
    .concat();
    builder.add_text(Some(&item.id), value, at, "text", &styles);
}

fn render_frame(builder: &mut SvgBuilder, item: &Item, frame: &FrameItem, rect: Rect, theme: &Theme) {
    let stroke = frame.stroke_color.as_deref().unwrap_or(&theme.palette.ink);
    let styles = [
        attr("fill", &frame.fill_color),
        attr("stroke", stroke),
        num_attr("stroke-width", frame.stroke_width),
    ]
    .concat();
    builder.add_rect(Some(&item.id), rect, frame.corner_radius, "frame", &styles);
}

fn render_image(builder: &mut SvgBuilder, item: &Item, image: &ImageItem, rect: Rect, card: &CardData) {
    let href = card.field(&image.field_id);
    if href.is_empty() {
        return;
    }

    let clip_id = if image.corner_radius > 0.0 {
        Some(builder.add_clip_path(&item.id, rect, image.corner_radius))
    } else {
        None
    };
    builder.add_image(
        Some(&item.id),
        href,
        rect,
        image.fit.preserve_aspect_ratio(),
        clip_id.as_deref(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute;
    use crate::model::{AnchorPoint, Attach, ImageFit, Section, SectionLayout, Template};
    use crate::renderer::SvgConfig;

    fn render(template: &Template, card: &CardData) -> String {
        let layout = compute(template);
        let mut builder = SvgBuilder::new(SvgConfig::inline());
        render_items(&mut builder, &layout, card, &Theme::default());
        builder.build(template.width, template.height)
    }

    fn single(item: Item) -> Template {
        Template::new("t", Section::new("root", SectionLayout::Stack).with_item(item))
            .with_canvas(100.0, 100.0, 0.0)
    }

    #[test]
    fn test_alignment_mappings() {
        assert_eq!(text_anchor(TextAlign::Left), "start");
        assert_eq!(text_anchor(TextAlign::Center), "middle");
        assert_eq!(text_anchor(TextAlign::Right), "end");
        assert_eq!(dominant_baseline(AnchorCoord::Start), "hanging");
        assert_eq!(dominant_baseline(AnchorCoord::Middle), "middle");
        assert_eq!(dominant_baseline(AnchorCoord::End), "baseline");
    }

    #[test]
    fn test_text_sits_on_anchor_point() {
        let item = Item::text("title", "name")
            .with_anchor(AnchorPoint::CENTER)
            .with_attach(Attach::section("root", AnchorPoint::CENTER));
        let svg = render(&single(item), &CardData::new("c", "Ember"));
        assert!(svg.contains(r#"x="50" y="50""#));
        assert!(svg.contains(r#"dominant-baseline="middle""#));
        assert!(svg.contains(r##"fill="#1b1a17""##));
        assert!(svg.contains(r#"font-size="20""#));
        assert!(svg.contains(">Ember</text>"));
    }

    #[test]
    fn test_empty_text_is_omitted() {
        let svg = render(&single(Item::text("t", "flavor")), &CardData::new("c", "Ember"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_text_color_and_title_font() {
        let mut item = Item::text("t", "name");
        if let ItemKind::Text(text) = &mut item.kind {
            text.color = Some("#ff0000".to_string());
            text.font = crate::model::FontRole::Title;
        }
        let svg = render(&single(item), &CardData::new("c", "Ember"));
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains("Fraunces"));
    }

    #[test]
    fn test_frame_defaults() {
        let svg = render(&single(Item::frame("border")), &CardData::default());
        assert!(svg.contains(
            r#"<rect id="border" class="card-frame" x="0" y="0" width="50" height="50" rx="8""#
        ));
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r##"stroke="#1b1a17""##));
        assert!(svg.contains(r#"stroke-width="2""#));
    }

    #[test]
    fn test_image_without_radius_has_no_clip() {
        let mut item = Item::image("art", "art");
        if let ItemKind::Image(image) = &mut item.kind {
            image.fit = ImageFit::Contain;
        }
        let card = CardData::new("c", "x").with_field("art", "art.png");
        let svg = render(&single(item), &card);
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid meet""#));
        assert!(svg.contains(r#"href="art.png""#));
        assert!(!svg.contains("clip-path"));
    }

    #[test]
    fn test_clip_ids_deduplicated_for_repeated_items() {
        let mut item = Item::image("art", "art");
        if let ItemKind::Image(image) = &mut item.kind {
            image.corner_radius = 4.0;
        }
        let template = Template::new(
            "t",
            Section::new("root", SectionLayout::Stack)
                .with_item(item.clone())
                .with_item(item),
        );
        let card = CardData::new("c", "x").with_field("art", "a.png");
        let svg = render(&template, &card);
        assert!(svg.contains(r#"clip-path="url(#clip-art)""#));
        assert!(svg.contains(r#"clip-path="url(#clip-art-2)""#));
        assert_eq!(svg.matches("<defs>").count(), 1);
    }
}
