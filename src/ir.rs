//! Input model for signal radar documents.
//!
//! A document is a flat list of signals, each carrying the classification
//! attributes the layout engine buckets on: the maturity ring, the STEEP
//! driver, and (for split maps) the polarity hemisphere.

use serde::{Deserialize, Serialize};

/// Lifecycle ring a signal sits on, ordered inner to outer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Established,
    Growing,
    Emerging,
    Speculative,
}

impl Maturity {
    /// Rings in drawing order, inner to outer.
    pub const ALL: [Maturity; 4] = [
        Maturity::Established,
        Maturity::Growing,
        Maturity::Emerging,
        Maturity::Speculative,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "established" | "core" => Some(Self::Established),
            "growing" | "scaling" => Some(Self::Growing),
            "emerging" => Some(Self::Emerging),
            "speculative" | "weak" => Some(Self::Speculative),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Established => "Established",
            Self::Growing => "Growing",
            Self::Emerging => "Emerging",
            Self::Speculative => "Speculative",
        }
    }
}

/// STEEP driver, the category axis used for color grouping.
///
/// `Unclassified` is the catch-all bucket: any token outside the fixed
/// list lands there instead of failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Social,
    Technological,
    Economic,
    Environmental,
    Political,
    Unclassified,
}

impl Driver {
    /// Fixed bucket order around a ring. `Unclassified` always trails.
    pub const ORDER: [Driver; 6] = [
        Driver::Social,
        Driver::Technological,
        Driver::Economic,
        Driver::Environmental,
        Driver::Political,
        Driver::Unclassified,
    ];

    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "social" | "societal" => Self::Social,
            "technological" | "tech" => Self::Technological,
            "economic" => Self::Economic,
            "environmental" => Self::Environmental,
            "political" | "regulatory" => Self::Political,
            _ => Self::Unclassified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Social => "Social",
            Self::Technological => "Technological",
            Self::Economic => "Economic",
            Self::Environmental => "Environmental",
            Self::Political => "Political",
            Self::Unclassified => "Unclassified",
        }
    }

    /// Position in the fixed bucket order.
    pub fn order_index(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|d| d == self)
            .unwrap_or(Self::ORDER.len())
    }
}

/// Hemisphere axis for split maps: opportunities right, risks left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Opportunity,
    Risk,
}

impl Polarity {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "opportunity" | "upside" => Some(Self::Opportunity),
            "risk" | "threat" => Some(Self::Risk),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Opportunity => "Opportunities",
            Self::Risk => "Risks",
        }
    }
}

/// Whether signals spread over the full circle or split into hemispheres
/// by polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapVariant {
    #[default]
    Full,
    Split,
}

impl MapVariant {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "full" | "circle" => Some(Self::Full),
            "split" | "hemispheres" => Some(Self::Split),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Signal {
    pub id: String,
    pub name: String,
    pub maturity: Maturity,
    pub driver: Driver,
    pub polarity: Polarity,
}

/// A parsed signal document. Signal order is preserved from the input and
/// is part of the deterministic layout snapshot.
#[derive(Debug, Clone)]
pub struct SignalSet {
    pub title: Option<String>,
    pub variant: MapVariant,
    pub signals: Vec<Signal>,
}

impl SignalSet {
    pub fn new(variant: MapVariant) -> Self {
        Self {
            title: None,
            variant,
            signals: Vec::new(),
        }
    }

    /// Signals assigned to one ring, input order preserved.
    pub fn in_ring(&self, ring: Maturity) -> impl Iterator<Item = &Signal> {
        self.signals.iter().filter(move |s| s.maturity == ring)
    }
}

impl Default for SignalSet {
    fn default() -> Self {
        Self::new(MapVariant::Full)
    }
}
