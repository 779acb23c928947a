//! Anchor points: the nine canonical pin positions on a box

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One axis of an anchor: start (0), middle (0.5) or end (1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnchorCoord {
    #[default]
    Start,
    Middle,
    End,
}

impl AnchorCoord {
    /// Snap an arbitrary number to the nearest of 0, 0.5 and 1
    pub fn snap(value: f64) -> Self {
        if value >= 0.75 {
            AnchorCoord::End
        } else if value >= 0.25 {
            AnchorCoord::Middle
        } else {
            // NaN lands here too
            AnchorCoord::Start
        }
    }

    /// The coordinate as a fraction of the box extent
    pub fn fraction(self) -> f64 {
        match self {
            AnchorCoord::Start => 0.0,
            AnchorCoord::Middle => 0.5,
            AnchorCoord::End => 1.0,
        }
    }
}

impl Serialize for AnchorCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.fraction())
    }
}

impl<'de> Deserialize<'de> for AnchorCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = super::lenient::number(deserializer)?;
        Ok(value.map(AnchorCoord::snap).unwrap_or_default())
    }
}

/// A point on a box, expressed as fractions of its width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnchorPoint {
    #[serde(default)]
    pub x: AnchorCoord,
    #[serde(default)]
    pub y: AnchorCoord,
}

impl AnchorPoint {
    pub const TOP_LEFT: AnchorPoint = AnchorPoint::new(AnchorCoord::Start, AnchorCoord::Start);
    pub const CENTER: AnchorPoint = AnchorPoint::new(AnchorCoord::Middle, AnchorCoord::Middle);
    pub const BOTTOM_RIGHT: AnchorPoint = AnchorPoint::new(AnchorCoord::End, AnchorCoord::End);

    pub const fn new(x: AnchorCoord, y: AnchorCoord) -> Self {
        Self { x, y }
    }

    /// Build an anchor from raw fractions, snapping each axis
    pub fn from_fractions(x: f64, y: f64) -> Self {
        Self::new(AnchorCoord::snap(x), AnchorCoord::snap(y))
    }
}

/// All nine anchors in row-major order (top-left first, bottom-right last)
pub const ANCHOR_GRID: [AnchorPoint; 9] = [
    AnchorPoint::new(AnchorCoord::Start, AnchorCoord::Start),
    AnchorPoint::new(AnchorCoord::Middle, AnchorCoord::Start),
    AnchorPoint::new(AnchorCoord::End, AnchorCoord::Start),
    AnchorPoint::new(AnchorCoord::Start, AnchorCoord::Middle),
    AnchorPoint::new(AnchorCoord::Middle, AnchorCoord::Middle),
    AnchorPoint::new(AnchorCoord::End, AnchorCoord::Middle),
    AnchorPoint::new(AnchorCoord::Start, AnchorCoord::End),
    AnchorPoint::new(AnchorCoord::Middle, AnchorCoord::End),
    AnchorPoint::new(AnchorCoord::End, AnchorCoord::End),
];
