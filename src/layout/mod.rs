//! Layout engine for computing section and item rectangles
//!
//! Sections are laid out top-down inside the bleed-inset canvas. Items are
//! then sized from their home section and pinned to their attach targets.

pub mod index;
pub mod items;
pub mod sections;
pub mod types;

pub use index::{ItemEntry, ItemIdx, NodeRef, SectionIdx, TemplateIndex};
pub use items::{layout_items, place_item, resolve_items, AttachOutcome, ItemPlacement};
pub use sections::{layout_sections, partition, resolve_sections};
pub use types::*;

use crate::model::{NodeKind, Template};

use sections::non_negative;

/// The full canvas rectangle, with degenerate dimensions clamped to zero
pub fn canvas_rect(template: &Template) -> Rect {
    Rect::new(
        0.0,
        0.0,
        non_negative(template.width),
        non_negative(template.height),
    )
}

/// The canvas rectangle inset by the template's bleed
pub fn canvas_bounds(template: &Template) -> Rect {
    canvas_rect(template).inset(non_negative(template.bleed))
}

/// Complete layout of a template, addressed by arena index
#[derive(Debug, Clone)]
pub struct CardLayout<'a> {
    pub index: TemplateIndex<'a>,
    /// Section rectangles, indexed like `index.sections`
    pub sections: Vec<Rect>,
    /// Item placements, indexed like `index.items`
    pub items: Vec<ItemPlacement>,
}

impl<'a> CardLayout<'a> {
    pub fn section_rect(&self, idx: SectionIdx) -> Rect {
        self.sections.get(idx.0).copied().unwrap_or_default()
    }

    pub fn placement(&self, idx: ItemIdx) -> Option<&ItemPlacement> {
        self.items.get(idx.0)
    }

    /// Rectangle of the first node with the given kind and id
    pub fn rect_of(&self, kind: NodeKind, id: &str) -> Option<Rect> {
        match self.index.lookup(kind, id)? {
            NodeRef::Section(idx) => Some(self.section_rect(idx)),
            NodeRef::Item(idx) => self.placement(idx).map(|p| p.rect),
        }
    }
}

/// Lay out every section and item of the template
pub fn compute(template: &Template) -> CardLayout<'_> {
    let index = TemplateIndex::new(template);
    let sections = layout_sections(&template.root, canvas_bounds(template));
    let items = layout_items(&index, &sections);
    log::debug!(
        "laid out template '{}': {} sections, {} items",
        template.id,
        sections.len(),
        items.len()
    );
    CardLayout {
        index,
        sections,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnchorPoint, Attach, Item, Section, SectionLayout};

    #[test]
    fn test_canvas_bounds_apply_bleed() {
        let template = Template::new("t", Section::new("root", SectionLayout::Stack));
        assert_eq!(
            canvas_bounds(&template),
            Rect::new(18.0, 18.0, 714.0, 1014.0)
        );
    }

    #[test]
    fn test_canvas_bounds_sanitize() {
        let template = Template::new("t", Section::new("root", SectionLayout::Stack))
            .with_canvas(-10.0, 100.0, f64::NAN);
        assert_eq!(canvas_bounds(&template), Rect::new(0.0, 0.0, 0.0, 100.0));
    }

    #[test]
    fn test_compute_lookup_by_id() {
        let template = Template::new(
            "t",
            Section::new("root", SectionLayout::Row)
                .with_child(Section::new("a", SectionLayout::Stack))
                .with_child(
                    Section::new("b", SectionLayout::Stack).with_item(
                        Item::frame("box").with_attach(Attach::section("b", AnchorPoint::CENTER)),
                    ),
                ),
        )
        .with_canvas(200.0, 100.0, 0.0);
        let layout = compute(&template);
        assert_eq!(layout.sections.len(), 3);
        assert_eq!(
            layout.rect_of(NodeKind::Section, "b"),
            Some(Rect::new(100.0, 0.0, 100.0, 100.0))
        );
        assert_eq!(
            layout.rect_of(NodeKind::Item, "box"),
            Some(Rect::new(150.0, 50.0, 50.0, 50.0))
        );
        assert_eq!(layout.rect_of(NodeKind::Item, "b"), None);
    }
}
