//! Section layout: proportional partitioning of the section tree

use std::collections::HashMap;

use crate::model::{Section, SectionLayout};

use super::index::TemplateIndex;
use super::types::Rect;

/// Non-finite numbers count as zero; negatives are clamped to zero
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Split `parent` among children with the given weights.
///
/// `Stack` hands every child the parent rectangle. `Row` and `Column` divide
/// the main axis (width or height) by weight after reserving one `gap`
/// between each pair of neighbours. When all weights are zero the children
/// share the space equally, so the children always cover the parent.
pub fn partition(layout: SectionLayout, parent: Rect, gap: f64, weights: &[f64]) -> Vec<Rect> {
    if weights.is_empty() {
        return vec![];
    }
    if layout == SectionLayout::Stack {
        return vec![parent; weights.len()];
    }

    let gap = non_negative(gap);
    let gap_total = (weights.len() - 1) as f64 * gap;
    let main_size = match layout {
        SectionLayout::Row => parent.width,
        _ => parent.height,
    };
    let available = (main_size - gap_total).max(0.0);

    let weights: Vec<f64> = weights.iter().copied().map(non_negative).collect();
    let total: f64 = weights.iter().sum();
    let extent_of = |weight: f64| {
        if total > 0.0 {
            available * weight / total
        } else {
            available / weights.len() as f64
        }
    };

    let mut offset = 0.0;
    weights
        .iter()
        .map(|&weight| {
            let extent = extent_of(weight);
            let rect = match layout {
                SectionLayout::Row => {
                    Rect::new(parent.x + offset, parent.y, extent, parent.height)
                }
                _ => Rect::new(parent.x, parent.y + offset, parent.width, extent),
            };
            offset += extent + gap;
            rect
        })
        .collect()
}

/// Rectangles for every section of the tree, in pre-order
pub fn layout_sections(root: &Section, bounds: Rect) -> Vec<Rect> {
    let mut rects = vec![];
    let mut pending = vec![(root, bounds)];
    while let Some((section, rect)) = pending.pop() {
        log::trace!(
            "section '{}' at x={:.1} y={:.1} w={:.1} h={:.1}",
            section.id,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        rects.push(rect);

        if section.children.is_empty() {
            continue;
        }

        let weights: Vec<f64> = section.children.iter().map(|c| c.size_pct).collect();
        let child_rects = partition(section.layout, rect, section.gap, &weights);
        pending.extend(section.children.iter().zip(child_rects).rev());
    }
    rects
}

/// Resolve every section to its absolute rectangle, keyed by id.
///
/// When ids repeat, the first section in pre-order keeps the entry.
pub fn resolve_sections(root: &Section, bounds: Rect) -> HashMap<String, Rect> {
    let index = TemplateIndex::from_root(root);
    let mut by_id = HashMap::new();
    for (section, rect) in index.sections.iter().zip(layout_sections(root, bounds)) {
        by_id.entry(section.id.clone()).or_insert(rect);
    }
    by_id
}
