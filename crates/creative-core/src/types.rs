//! Core value types: gravity anchors, priority tiers, and sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the nine anchor points a layer offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    #[default]
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

/// Vertical component of a gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    North,
    Center,
    South,
}

/// Horizontal component of a gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    West,
    Center,
    East,
}

impl Gravity {
    /// All nine anchors, row by row from the top-left corner.
    pub const ALL: [Gravity; 9] = [
        Gravity::NorthWest,
        Gravity::North,
        Gravity::NorthEast,
        Gravity::West,
        Gravity::Center,
        Gravity::East,
        Gravity::SouthWest,
        Gravity::South,
        Gravity::SouthEast,
    ];

    /// Combine a vertical and a horizontal anchor.
    pub fn from_anchors(vertical: VerticalAnchor, horizontal: HorizontalAnchor) -> Self {
        use HorizontalAnchor as H;
        use VerticalAnchor as V;
        match (vertical, horizontal) {
            (V::North, H::West) => Gravity::NorthWest,
            (V::North, H::Center) => Gravity::North,
            (V::North, H::East) => Gravity::NorthEast,
            (V::Center, H::West) => Gravity::West,
            (V::Center, H::Center) => Gravity::Center,
            (V::Center, H::East) => Gravity::East,
            (V::South, H::West) => Gravity::SouthWest,
            (V::South, H::Center) => Gravity::South,
            (V::South, H::East) => Gravity::SouthEast,
        }
    }

    /// The vertical anchor. `west` and `east` are vertically centered.
    pub fn vertical(self) -> VerticalAnchor {
        match self {
            Gravity::SouthWest | Gravity::South | Gravity::SouthEast => VerticalAnchor::South,
            Gravity::West | Gravity::Center | Gravity::East => VerticalAnchor::Center,
            Gravity::NorthWest | Gravity::North | Gravity::NorthEast => VerticalAnchor::North,
        }
    }

    /// The horizontal anchor. `north` and `south` are horizontally centered.
    pub fn horizontal(self) -> HorizontalAnchor {
        match self {
            Gravity::NorthEast | Gravity::East | Gravity::SouthEast => HorizontalAnchor::East,
            Gravity::North | Gravity::Center | Gravity::South => HorizontalAnchor::Center,
            Gravity::NorthWest | Gravity::West | Gravity::SouthWest => HorizontalAnchor::West,
        }
    }

    /// The persisted name of this gravity.
    pub fn as_str(self) -> &'static str {
        match self {
            Gravity::NorthWest => "north_west",
            Gravity::North => "north",
            Gravity::NorthEast => "north_east",
            Gravity::West => "west",
            Gravity::Center => "center",
            Gravity::East => "east",
            Gravity::SouthWest => "south_west",
            Gravity::South => "south",
            Gravity::SouthEast => "south_east",
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown gravity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gravity: {0}")]
pub struct UnknownGravity(pub String);

impl FromStr for Gravity {
    type Err = UnknownGravity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gravity::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGravity(s.to_string()))
    }
}

/// Importance tier of a layer. Lower values are more important.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Never shrinks below its original size
    Critical = 0,
    High = 1,
    #[default]
    Medium = 2,
    /// First to shrink, and the first to be hidden
    Low = 3,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Numeric tier (0 = critical).
    pub fn tier(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width and height of a container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        is_valid_dimension(self.width) && is_valid_dimension(self.height)
    }
}

/// A dimension is usable when it is finite and strictly positive.
pub fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
