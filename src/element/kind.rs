//! Element and path vocabularies.
//!
//! Kinds only drive rendering. Anything the host sends that is not in the default
//! vocabulary is kept as an opaque tag and drawn with a neutral style.
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which mark is drawn inside an element's disc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Triangle,
    Square,
    Star,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Mountain,
    River,
    BellTree,
    Hollow,
    DriftLine,
    FrayZone,
    #[default]
    Settlement,
    ShardSite,
    Ruin,
    FoldedStructure,
    Custom,
    /// A host-provided tag outside the default vocabulary
    Other(String),
}

impl ElementKind {
    /// The eleven kinds offered in the editor palette.
    pub fn vocabulary() -> [ElementKind; 11] {
        [
            Self::Mountain,
            Self::River,
            Self::BellTree,
            Self::Hollow,
            Self::DriftLine,
            Self::FrayZone,
            Self::Settlement,
            Self::ShardSite,
            Self::Ruin,
            Self::FoldedStructure,
            Self::Custom,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Mountain => "mountain",
            Self::River => "river",
            Self::BellTree => "bell_tree",
            Self::Hollow => "hollow",
            Self::DriftLine => "drift_line",
            Self::FrayZone => "fray_zone",
            Self::Settlement => "settlement",
            Self::ShardSite => "shard_site",
            Self::Ruin => "ruin",
            Self::FoldedStructure => "folded_structure",
            Self::Custom => "custom",
            Self::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn color(&self) -> Color32 {
        match self {
            Self::Mountain => Color32::from_rgb(0x6b, 0x72, 0x80),
            Self::River => Color32::from_rgb(0x3b, 0x82, 0xf6),
            Self::BellTree => Color32::from_rgb(0x22, 0xc5, 0x5e),
            Self::Hollow => Color32::from_rgb(0x8b, 0x5c, 0xf6),
            Self::DriftLine => Color32::from_rgb(0x06, 0xb6, 0xd4),
            Self::FrayZone => Color32::from_rgb(0xef, 0x44, 0x44),
            Self::Settlement => Color32::from_rgb(0xf5, 0x9e, 0x0b),
            Self::ShardSite => Color32::from_rgb(0xec, 0x48, 0x99),
            Self::Ruin => Color32::from_rgb(0x78, 0x71, 0x6c),
            Self::FoldedStructure => Color32::from_rgb(0x63, 0x66, 0xf1),
            Self::Custom => Color32::from_rgb(0xa8, 0x55, 0xf7),
            Self::Other(_) => Color32::from_gray(0x9c),
        }
    }

    pub fn glyph(&self) -> Glyph {
        match self {
            Self::Mountain => Glyph::Triangle,
            Self::Settlement => Glyph::Square,
            Self::BellTree => Glyph::Star,
            _ => Glyph::Dot,
        }
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "mountain" => Self::Mountain,
            "river" => Self::River,
            "bell_tree" => Self::BellTree,
            "hollow" => Self::Hollow,
            "drift_line" => Self::DriftLine,
            "fray_zone" => Self::FrayZone,
            "settlement" => Self::Settlement,
            "shard_site" => Self::ShardSite,
            "ruin" => Self::Ruin,
            "folded_structure" => Self::FoldedStructure,
            "custom" => Self::Custom,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PathKind {
    #[default]
    Journey,
    TradeRoute,
    DriftPassage,
    FrayCorridor,
    LeyLine,
    Other(String),
}

impl PathKind {
    pub fn vocabulary() -> [PathKind; 5] {
        [
            Self::Journey,
            Self::TradeRoute,
            Self::DriftPassage,
            Self::FrayCorridor,
            Self::LeyLine,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Journey => "journey",
            Self::TradeRoute => "trade_route",
            Self::DriftPassage => "drift_passage",
            Self::FrayCorridor => "fray_corridor",
            Self::LeyLine => "ley_line",
            Self::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn color(&self) -> Color32 {
        match self {
            Self::Journey => Color32::from_rgb(0xf5, 0x9e, 0x0b),
            Self::TradeRoute => Color32::from_rgb(0x22, 0xc5, 0x5e),
            Self::DriftPassage => Color32::from_rgb(0x06, 0xb6, 0xd4),
            Self::FrayCorridor => Color32::from_rgb(0xef, 0x44, 0x44),
            Self::LeyLine => Color32::from_rgb(0x8b, 0x5c, 0xf6),
            Self::Other(_) => Color32::from_gray(0x9c),
        }
    }

    pub fn is_dashed(&self) -> bool {
        matches!(self, Self::DriftPassage)
    }
}

impl From<String> for PathKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "journey" => Self::Journey,
            "trade_route" => Self::TradeRoute,
            "drift_passage" => Self::DriftPassage,
            "fray_corridor" => Self::FrayCorridor,
            "ley_line" => Self::LeyLine,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for PathKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<PathKind> for String {
    fn from(kind: PathKind) -> Self {
        match kind {
            PathKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
