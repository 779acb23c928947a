//! Input model: templates, sections, items and card data
//!
//! These types are produced by an editor or storage layer and handed to the
//! engine by value. Decoding from JSON happens once, here; everything past
//! this module works with fully-typed values.

mod anchor;
mod item;
mod lenient;

pub use anchor::{AnchorCoord, AnchorPoint, ANCHOR_GRID};
pub use item::{
    Attach, FontRole, FrameItem, ImageFit, ImageItem, Item, ItemKind, NodeKind, TextAlign,
    TextItem,
};

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InputError;

/// How a section shares its space among its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLayout {
    /// Children side by side, splitting the width
    Row,
    /// Children top to bottom, splitting the height
    Column,
    /// Children all receive the parent's rectangle
    #[default]
    Stack,
}

/// A layout node in the template tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSection")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub layout: SectionLayout,
    /// Relative weight among siblings
    pub size_pct: f64,
    /// Spacing between children along the main axis
    pub gap: f64,
    pub children: Vec<Section>,
    pub items: Vec<Item>,
}

fn default_size_pct() -> f64 {
    100.0
}

/// Wire shape of a section; absent, `null` and unreadable values take defaults
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default, deserialize_with = "lenient::text")]
    id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    layout: SectionLayout,
    #[serde(default, deserialize_with = "lenient::number")]
    size_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    gap: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list")]
    children: Vec<Section>,
    #[serde(default, deserialize_with = "lenient::list")]
    items: Vec<Item>,
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            layout: raw.layout,
            size_pct: raw.size_pct.unwrap_or_else(default_size_pct),
            gap: raw.gap.unwrap_or(0.0),
            children: raw.children,
            items: raw.items,
        }
    }
}

impl Section {
    pub fn new(id: impl Into<String>, layout: SectionLayout) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            layout,
            size_pct: default_size_pct(),
            gap: 0.0,
            children: vec![],
            items: vec![],
        }
    }

    pub fn with_size_pct(mut self, size_pct: f64) -> Self {
        self.size_pct = size_pct;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_child(mut self, child: Section) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Label used in previews: the name, or the id when the name is blank
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Depth-first search for a section by id (first match wins)
    pub fn find_section(&self, id: &str) -> Option<&Section> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_section(id))
    }

    /// Depth-first search for an item by id (first match wins)
    pub fn find_item(&self, id: &str) -> Option<&Item> {
        if let Some(item) = self.items.iter().find(|item| item.id == id) {
            return Some(item);
        }
        self.children.iter().find_map(|child| child.find_item(id))
    }
}

/// A card template: canvas dimensions plus the section tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTemplate")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    /// Inset applied on all four sides before laying out the root section
    pub bleed: f64,
    pub root: Section,
}

fn default_width() -> f64 {
    750.0
}

fn default_height() -> f64 {
    1050.0
}

fn default_corner_radius() -> f64 {
    28.0
}

fn default_bleed() -> f64 {
    18.0
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTemplate {
    #[serde(default, deserialize_with = "lenient::text")]
    id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    height: Option<f64>,
    #[serde(default, alias = "radius", deserialize_with = "lenient::number")]
    corner_radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    bleed: Option<f64>,
    root: Section,
}

impl From<RawTemplate> for Template {
    fn from(raw: RawTemplate) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            width: raw.width.unwrap_or_else(default_width),
            height: raw.height.unwrap_or_else(default_height),
            corner_radius: raw.corner_radius.unwrap_or_else(default_corner_radius),
            bleed: raw.bleed.unwrap_or_else(default_bleed),
            root: raw.root,
        }
    }
}

impl Template {
    /// A template with default canvas settings around the given root section
    pub fn new(id: impl Into<String>, root: Section) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            width: default_width(),
            height: default_height(),
            corner_radius: default_corner_radius(),
            bleed: default_bleed(),
            root,
        }
    }

    pub fn with_canvas(mut self, width: f64, height: f64, bleed: f64) -> Self {
        self.width = width;
        self.height = height;
        self.bleed = bleed;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Decode a template from JSON
    pub fn from_json(source: &str) -> Result<Self, InputError> {
        serde_json::from_str(source).map_err(|e| InputError::from_json("template", e))
    }

    /// Encode the template as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, InputError> {
        serde_json::to_string_pretty(self).map_err(|e| InputError::from_json("template", e))
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.root.find_section(id)
    }

    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.root.find_item(id)
    }
}

impl Default for Template {
    /// The starter template: a header band with the card name over an empty body
    fn default() -> Self {
        let title = Item {
            name: "Title".to_string(),
            kind: ItemKind::Text(TextItem {
                field_id: "name".to_string(),
                font_size: 44.0,
                align: TextAlign::Left,
                font: FontRole::Title,
                color: None,
            }),
            ..Item::text("title", "name")
        }
        .with_anchor(AnchorPoint::new(AnchorCoord::Start, AnchorCoord::Middle))
        .with_attach(Attach::section(
            "header",
            AnchorPoint::new(AnchorCoord::Start, AnchorCoord::Middle),
        ))
        .with_size(90.0, 60.0);

        let mut header = Section::new("header", SectionLayout::Stack)
            .with_size_pct(20.0)
            .with_item(title);
        header.name = "Header".to_string();

        let mut body = Section::new("body", SectionLayout::Stack).with_size_pct(80.0);
        body.name = "Body".to_string();

        let mut root = Section::new("root", SectionLayout::Column)
            .with_gap(18.0)
            .with_child(header)
            .with_child(body);
        root.name = "Root".to_string();

        let mut template = Template::new("default", root);
        template.name = "Default".to_string();
        template
    }
}

/// The content of one card, bound to template fields at render time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardData {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "fields_as_strings")]
    pub fields: BTreeMap<String, String>,
}

impl CardData {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a field for a text item; `name` is an alias for the card name
    pub fn text_value(&self, field_id: &str) -> &str {
        if field_id == "name" {
            return &self.name;
        }
        self.field(field_id)
    }

    /// Look up a field value, empty when absent
    pub fn field(&self, field_id: &str) -> &str {
        self.fields.get(field_id).map(String::as_str).unwrap_or("")
    }

    /// Decode a single card from JSON
    pub fn from_json(source: &str) -> Result<Self, InputError> {
        serde_json::from_str(source).map_err(|e| InputError::from_json("card", e))
    }

    /// Decode a list of cards; a lone card object is accepted as a list of one
    pub fn list_from_json(source: &str) -> Result<Vec<Self>, InputError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            Many(Vec<CardData>),
            One(CardData),
        }

        let parsed: OneOrMany =
            serde_json::from_str(source).map_err(|e| InputError::from_json("card list", e))?;
        Ok(match parsed {
            OneOrMany::Many(cards) => cards,
            OneOrMany::One(card) => vec![card],
        })
    }
}

/// Stringify scalar field values; `null` becomes empty
fn fields_as_strings<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

/// The node highlighted in a template preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub id: String,
}

impl Selection {
    pub fn section(id: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Section,
            id: id.into(),
        }
    }

    pub fn item(id: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Item,
            id: id.into(),
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    /// Parse `section:<id>` or `item:<id>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected 'section:<id>' or 'item:<id>', got '{}'", s))?;
        if id.is_empty() {
            return Err(format!("missing id in selection '{}'", s));
        }
        match kind {
            "section" => Ok(Selection::section(id)),
            "item" => Ok(Selection::item(id)),
            other => Err(format!(
                "unknown selection type '{}' (expected 'section' or 'item')",
                other
            )),
        }
    }
}
