//! Item placement: anchor attachment with cycle-safe dependency resolution
//!
//! An item is sized from its home section and pinned to a point on its
//! attach target, which may be any section or any other item. Item targets
//! are resolved on demand and memoized. An explicit in-progress set breaks
//! reference cycles: an item whose target is still being resolved falls
//! back to its home section instead.

use std::collections::{HashMap, HashSet};

use crate::model::{Item, NodeKind, Template};

use super::index::{ItemIdx, NodeRef, SectionIdx, TemplateIndex};
use super::sections::non_negative;
use super::types::Rect;

/// How an item's attach reference was resolved
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttachOutcome {
    /// Pinned to the target it names
    #[default]
    Attached,
    /// No section or item has the referenced id; pinned to the home section
    MissingTarget { kind: NodeKind, id: String },
    /// The target was still being resolved when it was needed; pinned to the
    /// home section
    Cycle { kind: NodeKind, id: String },
}

impl AttachOutcome {
    pub fn is_attached(&self) -> bool {
        matches!(self, AttachOutcome::Attached)
    }

    /// Short annotation for fallbacks, e.g. `missing item:ghost`
    pub fn annotation(&self) -> Option<String> {
        match self {
            AttachOutcome::Attached => None,
            AttachOutcome::MissingTarget { kind, id } => {
                Some(format!("missing {}:{}", kind, id))
            }
            AttachOutcome::Cycle { kind, id } => Some(format!("cycle {}:{}", kind, id)),
        }
    }
}

/// The resolved placement of one item occurrence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemPlacement {
    /// The item's own rectangle
    pub rect: Rect,
    /// The rectangle the item was actually pinned to
    pub target_rect: Rect,
    pub outcome: AttachOutcome,
}

impl ItemPlacement {
    pub fn is_attached(&self) -> bool {
        self.outcome.is_attached()
    }
}

/// Size an item from its home section and pin it to `target`
pub fn place_item(item: &Item, home: Rect, target: Rect) -> Rect {
    let width = home.width * non_negative(item.width_pct) / 100.0;
    let height = home.height * non_negative(item.height_pct) / 100.0;
    let target_point = target.anchor_point(item.attach.anchor);
    Rect::pinned(target_point, width, height, item.anchor)
}

/// Resolver state for one layout pass
struct Resolver<'i, 'a> {
    index: &'i TemplateIndex<'a>,
    sections: &'i [Rect],
    resolved: Vec<Option<ItemPlacement>>,
    in_progress: HashSet<ItemIdx>,
}

impl<'i, 'a> Resolver<'i, 'a> {
    fn new(index: &'i TemplateIndex<'a>, sections: &'i [Rect]) -> Self {
        Self {
            index,
            sections,
            resolved: vec![None; index.items.len()],
            in_progress: HashSet::new(),
        }
    }

    fn section_rect(&self, idx: SectionIdx) -> Rect {
        self.sections.get(idx.0).copied().unwrap_or_default()
    }

    /// Resolve an item and, first, every item it depends on.
    ///
    /// Dependencies are walked with an explicit stack, so long attach chains
    /// do not grow the call stack. An item whose target is already on the
    /// stack is part of a cycle and falls back to its home section.
    fn resolve(&mut self, start: ItemIdx) {
        if self.resolved[start.0].is_some() {
            return;
        }
        let mut path = vec![start];
        self.in_progress.insert(start);

        while let Some(&idx) = path.last() {
            let entry = *self.index.item(idx);
            let home = self.section_rect(entry.home);
            let attach = &entry.item.attach;

            let (target_rect, outcome) =
                match self.index.lookup(attach.target_type, &attach.target_id) {
                    Some(NodeRef::Section(section)) => {
                        (self.section_rect(section), AttachOutcome::Attached)
                    }
                    Some(NodeRef::Item(target)) => {
                        if let Some(placement) = &self.resolved[target.0] {
                            (placement.rect, AttachOutcome::Attached)
                        } else if self.in_progress.insert(target) {
                            path.push(target);
                            continue;
                        } else {
                            (
                                home,
                                AttachOutcome::Cycle {
                                    kind: attach.target_type,
                                    id: attach.target_id.clone(),
                                },
                            )
                        }
                    }
                    None => (
                        home,
                        AttachOutcome::MissingTarget {
                            kind: attach.target_type,
                            id: attach.target_id.clone(),
                        },
                    ),
                };

            if let Some(reason) = outcome.annotation() {
                log::debug!(
                    "item '{}' placed against its home section: {}",
                    entry.item.id,
                    reason
                );
            }

            self.resolved[idx.0] = Some(ItemPlacement {
                rect: place_item(entry.item, home, target_rect),
                target_rect,
                outcome,
            });
            self.in_progress.remove(&idx);
            path.pop();
        }
    }

    fn finish(mut self) -> Vec<ItemPlacement> {
        for i in 0..self.index.items.len() {
            self.resolve(ItemIdx(i));
        }
        // Every item was resolved by the loop above
        self.resolved.into_iter().map(Option::unwrap_or_default).collect()
    }
}

/// Place every item of the index, given section rectangles in index order.
///
/// The result is indexed like `index.items`.
pub fn layout_items(index: &TemplateIndex<'_>, sections: &[Rect]) -> Vec<ItemPlacement> {
    Resolver::new(index, sections).finish()
}

/// Resolve every item to its absolute rectangle, keyed by id.
///
/// `section_rects` maps section ids to rectangles, as produced by
/// [`resolve_sections`](super::sections::resolve_sections). Sections missing
/// from the map resolve to a zero rectangle at the origin.
pub fn resolve_items(
    template: &Template,
    section_rects: &HashMap<String, Rect>,
) -> HashMap<String, Rect> {
    let index = TemplateIndex::new(template);
    let sections: Vec<Rect> = index
        .sections
        .iter()
        .map(|section| {
            section_rects
                .get(&section.id)
                .copied()
                .unwrap_or_default()
        })
        .collect();

    let placements = layout_items(&index, &sections);
    let mut by_id = HashMap::new();
    for (entry, placement) in index.items.iter().zip(placements) {
        by_id.entry(entry.item.id.clone()).or_insert(placement.rect);
    }
    by_id
}
