//! Content items: text, frame and image
//!
//! Items arrive as loosely-typed JSON objects with an optional `type` tag.
//! They are decoded once, here, into the closed [`ItemKind`] sum type so the
//! layout engine and renderer never deal with optional fields.

use serde::{Deserialize, Deserializer, Serialize};

use super::anchor::AnchorPoint;
use super::lenient;

/// Whether a reference points at a section or at an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Section,
    Item,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Section => "section",
            NodeKind::Item => "item",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an item is pinned: a point on some other section or item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attach {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub target_type: NodeKind,
    #[serde(default = "default_target_id", deserialize_with = "target_id")]
    pub target_id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub anchor: AnchorPoint,
}

fn default_target_id() -> String {
    "root".to_string()
}

fn target_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::string(deserializer)?.unwrap_or_else(default_target_id))
}

impl Default for Attach {
    fn default() -> Self {
        Self {
            target_type: NodeKind::Section,
            target_id: default_target_id(),
            anchor: AnchorPoint::default(),
        }
    }
}

impl Attach {
    pub fn section(id: impl Into<String>, anchor: AnchorPoint) -> Self {
        Self {
            target_type: NodeKind::Section,
            target_id: id.into(),
            anchor,
        }
    }

    pub fn item(id: impl Into<String>, anchor: AnchorPoint) -> Self {
        Self {
            target_type: NodeKind::Item,
            target_id: id.into(),
            anchor,
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font role, resolved to a family through the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Title,
    #[default]
    Body,
}

/// How an image fills its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

impl ImageFit {
    /// The matching SVG `preserveAspectRatio` value
    pub fn preserve_aspect_ratio(self) -> &'static str {
        match self {
            ImageFit::Cover => "xMidYMid slice",
            ImageFit::Contain => "xMidYMid meet",
            ImageFit::Fill => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub field_id: String,
    pub font_size: f64,
    pub align: TextAlign,
    pub font: FontRole,
    pub color: Option<String>,
}

impl Default for TextItem {
    fn default() -> Self {
        Self {
            field_id: "name".to_string(),
            font_size: 20.0,
            align: TextAlign::Left,
            font: FontRole::Body,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameItem {
    pub stroke_width: f64,
    pub stroke_color: Option<String>,
    pub fill_color: String,
    pub corner_radius: f64,
}

impl Default for FrameItem {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke_color: None,
            fill_color: "none".to_string(),
            corner_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    pub field_id: String,
    pub fit: ImageFit,
    pub corner_radius: f64,
}

impl Default for ImageItem {
    fn default() -> Self {
        Self {
            field_id: "image".to_string(),
            fit: ImageFit::Cover,
            corner_radius: 0.0,
        }
    }
}

/// Variant-specific item data
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Text(TextItem),
    Frame(FrameItem),
    Image(ImageItem),
}

impl ItemKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::Text(_) => "text",
            ItemKind::Frame(_) => "frame",
            ItemKind::Image(_) => "image",
        }
    }
}

/// A positioned content element owned by one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawItem", into = "RawItem")]
pub struct Item {
    pub id: String,
    pub name: String,
    /// The point on the item's own box that is pinned
    pub anchor: AnchorPoint,
    pub attach: Attach,
    /// Width as a percentage of the home section's width
    pub width_pct: f64,
    /// Height as a percentage of the home section's height
    pub height_pct: f64,
    pub kind: ItemKind,
}

impl Item {
    /// A text item with default styling, bound to `field_id`
    pub fn text(id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            ItemKind::Text(TextItem {
                field_id: field_id.into(),
                ..TextItem::default()
            }),
        )
    }

    /// A frame item with default styling
    pub fn frame(id: impl Into<String>) -> Self {
        Self::with_kind(id, ItemKind::Frame(FrameItem::default()))
    }

    /// An image item bound to `field_id`
    pub fn image(id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            ItemKind::Image(ImageItem {
                field_id: field_id.into(),
                ..ImageItem::default()
            }),
        )
    }

    fn with_kind(id: impl Into<String>, kind: ItemKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            anchor: AnchorPoint::default(),
            attach: Attach::default(),
            width_pct: 50.0,
            height_pct: 50.0,
            kind,
        }
    }

    pub fn with_anchor(mut self, anchor: AnchorPoint) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_attach(mut self, attach: Attach) -> Self {
        self.attach = attach;
        self
    }

    pub fn with_size(mut self, width_pct: f64, height_pct: f64) -> Self {
        self.width_pct = width_pct;
        self.height_pct = height_pct;
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
}

/// Flat wire shape of an item, as found in template JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawItem {
    #[serde(deserialize_with = "lenient::text")]
    id: String,
    #[serde(deserialize_with = "lenient::text")]
    name: String,
    #[serde(rename = "type", deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    anchor: AnchorPoint,
    #[serde(deserialize_with = "lenient::or_default")]
    attach: Attach,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    width_pct: Option<f64>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    height_pct: Option<f64>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    field_id: Option<String>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    align: Option<TextAlign>,
    #[serde(deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    font: Option<FontRole>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    stroke_width: Option<f64>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    stroke_color: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    fill_color: Option<String>,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    corner_radius: Option<f64>,
    #[serde(deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    fit: Option<ImageFit>,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        let kind = match raw.kind.as_deref() {
            Some("frame") => {
                let defaults = FrameItem::default();
                ItemKind::Frame(FrameItem {
                    stroke_width: raw.stroke_width.unwrap_or(defaults.stroke_width),
                    stroke_color: raw.stroke_color,
                    fill_color: raw.fill_color.unwrap_or(defaults.fill_color),
                    corner_radius: raw.corner_radius.unwrap_or(defaults.corner_radius),
                })
            }
            Some("image") => {
                let defaults = ImageItem::default();
                ItemKind::Image(ImageItem {
                    field_id: raw.field_id.unwrap_or(defaults.field_id),
                    fit: raw.fit.unwrap_or(defaults.fit),
                    corner_radius: raw.corner_radius.unwrap_or(defaults.corner_radius),
                })
            }
            // Untagged legacy items and unknown tags are text
            _ => {
                let defaults = TextItem::default();
                ItemKind::Text(TextItem {
                    field_id: raw.field_id.unwrap_or(defaults.field_id),
                    font_size: raw.font_size.unwrap_or(defaults.font_size),
                    align: raw.align.unwrap_or(defaults.align),
                    font: raw.font.unwrap_or(defaults.font),
                    color: raw.color,
                })
            }
        };

        Item {
            id: raw.id,
            name: raw.name,
            anchor: raw.anchor,
            attach: raw.attach,
            width_pct: raw.width_pct.unwrap_or(50.0),
            height_pct: raw.height_pct.unwrap_or(50.0),
            kind,
        }
    }
}

impl From<Item> for RawItem {
    fn from(item: Item) -> Self {
        let mut raw = RawItem {
            id: item.id,
            name: item.name,
            kind: Some(item.kind.tag().to_string()),
            anchor: item.anchor,
            attach: item.attach,
            width_pct: Some(item.width_pct),
            height_pct: Some(item.height_pct),
            ..RawItem::default()
        };
        match item.kind {
            ItemKind::Text(text) => {
                raw.field_id = Some(text.field_id);
                raw.font_size = Some(text.font_size);
                raw.align = Some(text.align);
                raw.font = Some(text.font);
                raw.color = text.color;
            }
            ItemKind::Frame(frame) => {
                raw.stroke_width = Some(frame.stroke_width);
                raw.stroke_color = frame.stroke_color;
                raw.fill_color = Some(frame.fill_color);
                raw.corner_radius = Some(frame.corner_radius);
            }
            ItemKind::Image(image) => {
                raw.field_id = Some(image.field_id);
                raw.fit = Some(image.fit);
                raw.corner_radius = Some(image.corner_radius);
            }
        }
        raw
    }
}
