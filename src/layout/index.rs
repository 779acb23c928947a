//! Flat arena view of a template tree
//!
//! Item attach references form a graph across the section tree, so both
//! sections and items are stored in vectors and addressed by index. Id
//! lookups go through maps that keep the first occurrence of each id.

use std::collections::HashMap;

use crate::model::{Item, NodeKind, Section, Template};

/// Position of a section in [`TemplateIndex::sections`] (pre-order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionIdx(pub usize);

/// Position of an item in [`TemplateIndex::items`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIdx(pub usize);

/// An item together with the section that owns it
#[derive(Debug, Clone, Copy)]
pub struct ItemEntry<'a> {
    pub item: &'a Item,
    pub home: SectionIdx,
}

/// Either kind of node, as found by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Section(SectionIdx),
    Item(ItemIdx),
}

#[derive(Debug, Clone)]
pub struct TemplateIndex<'a> {
    /// Sections in pre-order
    pub sections: Vec<&'a Section>,
    /// Items in render order: a section's own items, then its children's
    pub items: Vec<ItemEntry<'a>>,
    section_ids: HashMap<&'a str, SectionIdx>,
    item_ids: HashMap<&'a str, ItemIdx>,
}

impl<'a> TemplateIndex<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self::from_root(&template.root)
    }

    pub fn from_root(root: &'a Section) -> Self {
        let mut index = Self {
            sections: vec![],
            items: vec![],
            section_ids: HashMap::new(),
            item_ids: HashMap::new(),
        };
        index.visit(root);
        index
    }

    /// Pre-order walk with an explicit stack, so nesting depth is not
    /// limited by the call stack
    fn visit(&mut self, root: &'a Section) {
        let mut pending = vec![root];
        while let Some(section) = pending.pop() {
            let idx = SectionIdx(self.sections.len());
            self.sections.push(section);
            self.section_ids.entry(section.id.as_str()).or_insert(idx);

            for item in &section.items {
                let item_idx = ItemIdx(self.items.len());
                self.items.push(ItemEntry { item, home: idx });
                self.item_ids.entry(item.id.as_str()).or_insert(item_idx);
            }

            pending.extend(section.children.iter().rev());
        }
    }

    pub fn item(&self, idx: ItemIdx) -> &ItemEntry<'a> {
        &self.items[idx.0]
    }

    pub fn section_by_id(&self, id: &str) -> Option<SectionIdx> {
        self.section_ids.get(id).copied()
    }

    pub fn item_by_id(&self, id: &str) -> Option<ItemIdx> {
        self.item_ids.get(id).copied()
    }

    /// Resolve a typed reference such as an attach target or a selection
    pub fn lookup(&self, kind: NodeKind, id: &str) -> Option<NodeRef> {
        match kind {
            NodeKind::Section => self.section_by_id(id).map(NodeRef::Section),
            NodeKind::Item => self.item_by_id(id).map(NodeRef::Item),
        }
    }

}
