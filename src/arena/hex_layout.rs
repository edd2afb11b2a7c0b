//! Pointy-top axial layout and hexagon enumeration for arena tiles.

use bevy::prelude::*;
use hexx::Hex;

use crate::math;

/// Pointy-top axial layout for arena tiles.
///
/// Kept separate from `hexx::HexLayout` so world positions follow the arena
/// formula exactly (`x = s·(√3q + √3/2·r)`, `z = s·3/2·r`) regardless of the
/// library's orientation defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaHexLayout {
    /// Hex circumradius in world units.
    pub tile_size: f32,
}

impl ArenaHexLayout {
    /// Layout with the given tile circumradius.
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    // ── Coordinate conversion ──────────────────────────────────────

    /// World-space `(x, z)` centre of a hex.
    pub fn hex_to_world_pos(&self, hex: Hex) -> Vec2 {
        math::axial_to_world(hex.x, hex.y, self.tile_size)
    }

    /// Hex distance between two cells.
    pub fn distance(a: Hex, b: Hex) -> u32 {
        math::hex_distance(a, b)
    }

    // ── Enumeration ────────────────────────────────────────────────

    /// Every cell within `radius` of the origin, `q` ascending then `r` ascending.
    pub fn hexagon(radius: u32) -> impl Iterator<Item = Hex> {
        let n = radius as i32;
        (-n..=n).flat_map(move |q| {
            let r_min = (-n).max(-q - n);
            let r_max = n.min(-q + n);
            (r_min..=r_max).map(move |r| Hex::new(q, r))
        })
    }

    /// Whether `hex` lies within `radius` of the origin.
    pub fn contains(radius: u32, hex: Hex) -> bool {
        math::hex_distance(Hex::ZERO, hex) <= radius
    }
}
