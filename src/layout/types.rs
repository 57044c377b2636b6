use crate::ir::{Driver, MapVariant, Maturity, Polarity};

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// Horizontal text anchor, matching the SVG `text-anchor` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// One signal with its resolved map geometry.
#[derive(Debug, Clone)]
pub struct SignalLayout {
    pub id: String,
    pub ring: Maturity,
    pub driver: Driver,
    pub polarity: Polarity,
    /// Dot position on the ring circle.
    pub x: f32,
    pub y: f32,
    /// Angle the dot was placed at, radians.
    pub angle: f32,
    /// Label anchor point, offset outward from the dot.
    pub text_x: f32,
    pub text_y: f32,
    pub anchor: TextAnchor,
    pub label: TextBlock,
    pub color: String,
}

/// A concentric guide circle.
#[derive(Debug, Clone)]
pub struct RingLayout {
    pub ring: Maturity,
    pub radius: f32,
    /// Count of signals placed on this ring.
    pub count: usize,
    /// Position of the ring name, drawn on the vertical axis.
    pub label_x: f32,
    pub label_y: f32,
    pub label: TextBlock,
}

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub driver: Driver,
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub label: TextBlock,
}

#[derive(Debug, Clone)]
pub struct TitleLayout {
    pub x: f32,
    pub y: f32,
    pub text: TextBlock,
}

/// Position of a hemisphere heading on a split map.
#[derive(Debug, Clone)]
pub struct HemisphereLabel {
    pub polarity: Polarity,
    pub x: f32,
    pub y: f32,
    pub label: TextBlock,
}

/// The full derived layout. Regenerated wholesale from the signal set and
/// view parameters; never patched in place.
#[derive(Debug, Clone)]
pub struct Layout {
    pub variant: MapVariant,
    pub center: (f32, f32),
    pub rings: Vec<RingLayout>,
    pub signals: Vec<SignalLayout>,
    pub legend: Vec<LegendItem>,
    pub title: Option<TitleLayout>,
    pub hemisphere_labels: Vec<HemisphereLabel>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    /// Radius of a named ring, if any signals or defaults produced one.
    pub fn ring_radius(&self, ring: Maturity) -> Option<f32> {
        self.rings
            .iter()
            .find(|r| r.ring == ring)
            .map(|r| r.radius)
    }
}
