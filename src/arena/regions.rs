//! Priority-ordered region classification.

use std::fmt;

use bevy::prelude::*;
use hexx::Hex;

use super::hex_layout::ArenaHexLayout;
use super::{GridConfig, RegionRadii};

/// Mutually exclusive tile classification.
///
/// Variants are declared in priority order, so the derived `Ord` also gives
/// the layer order: bases, arena, path, then background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum Region {
    /// Home base around anchor `0..=2`.
    Base(u8),
    /// Central arena disc.
    Arena,
    /// Corridor from a base anchor toward the origin.
    Path,
    /// Background.
    Empty,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(index) => write!(f, "Base{index}"),
            Self::Arena => f.write_str("Arena"),
            Self::Path => f.write_str("Path"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// Unit axial step from each anchor toward the origin, by anchor index.
pub const PATH_STEPS: [Hex; 3] = [Hex::new(-1, 1), Hex::new(1, 0), Hex::new(0, -1)];

/// Base anchors for a grid of `radius` rings, by anchor index:
/// `(r, -r)`, `(-r, 0)`, `(0, r)`.
pub fn anchors(radius: u32) -> [Hex; 3] {
    let r = radius as i32;
    [Hex::new(r, -r), Hex::new(-r, 0), Hex::new(0, r)]
}

/// Priority-ordered region test for one generation pass.
///
/// Base > Arena > Path > Empty; the first matching test wins. A resolved
/// extent of zero disables that region, and corridors are only laid when
/// bases exist to connect.
#[derive(Clone, Debug)]
pub struct RegionClassifier {
    radius: u32,
    radii: RegionRadii,
    anchors: [Hex; 3],
}

impl RegionClassifier {
    /// Classifier for `cfg`, with extents resolved once up front.
    pub fn new(cfg: &GridConfig) -> Self {
        Self::with_radii(cfg.radius, cfg.resolve())
    }

    /// Classifier with explicit extents.
    pub fn with_radii(radius: u32, radii: RegionRadii) -> Self {
        Self {
            radius,
            radii,
            anchors: anchors(radius),
        }
    }

    /// Resolved extents in use.
    pub fn radii(&self) -> RegionRadii {
        self.radii
    }

    /// Region of `hex`.
    pub fn classify(&self, hex: Hex) -> Region {
        if let Some(index) = self.base_index(hex) {
            return Region::Base(index);
        }
        if self.radii.arena > 0 && ArenaHexLayout::distance(hex, Hex::ZERO) <= self.radii.arena {
            return Region::Arena;
        }
        if self.on_path(hex) {
            return Region::Path;
        }
        Region::Empty
    }

    /// First anchor, in index order, whose base contains `hex`.
    fn base_index(&self, hex: Hex) -> Option<u8> {
        if self.radii.base == 0 {
            return None;
        }
        self.anchors
            .iter()
            .position(|&anchor| ArenaHexLayout::distance(hex, anchor) <= self.radii.base)
            .map(|i| i as u8)
    }

    /// Walks each corridor from its anchor toward the origin, short-circuiting
    /// on the first walked point within `path_width` of `hex`.
    fn on_path(&self, hex: Hex) -> bool {
        if self.radii.base == 0 {
            return false;
        }
        self.anchors
            .iter()
            .zip(PATH_STEPS)
            .any(|(&anchor, step)| {
                let mut point = anchor;
                while point != Hex::ZERO && ArenaHexLayout::contains(self.radius, point) {
                    if ArenaHexLayout::distance(hex, point) <= self.radii.path_width {
                        return true;
                    }
                    point += step;
                }
                false
            })
    }
}

/// One-shot classification of `hex` under `cfg`.
///
/// Resolves extents on every call; generation builds a [`RegionClassifier`] once instead.
pub fn classify(hex: Hex, cfg: &GridConfig) -> Region {
    RegionClassifier::new(cfg).classify(hex)
}
