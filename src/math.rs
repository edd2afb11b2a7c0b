//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / [`Hex`] inputs, making them straightforward to
//! unit-test.

use bevy::prelude::Vec2;
use hexx::Hex;

/// `√3`, the horizontal spacing factor of a pointy-top hex layout.
const SQRT_3: f32 = 1.732_050_8;

/// Number of tiles in a hexagon of `radius` rings around the origin: `3r(r+1)+1`.
///
/// # Examples
/// ```
/// # use hex_arena::math::cell_count;
/// assert_eq!(cell_count(0), 1);
/// assert_eq!(cell_count(1), 7);
/// assert_eq!(cell_count(2), 19);
/// ```
pub fn cell_count(radius: u32) -> usize {
    let r = radius as usize;
    3 * r * (r + 1) + 1
}

/// World-space `(x, z)` centre of the axial cell `(q, r)` for a pointy-top layout.
///
/// `x = size·(√3·q + √3/2·r)`, `z = size·(3/2·r)`.
pub fn axial_to_world(q: i32, r: i32, hex_size: f32) -> Vec2 {
    let (q, r) = (q as f32, r as f32);
    Vec2::new(
        hex_size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        hex_size * (1.5 * r),
    )
}

/// Hex distance `max(|Δq|, |Δr|, |Δs|)` between two axial coordinates.
///
/// # Examples
/// ```
/// # use hexx::Hex;
/// # use hex_arena::math::hex_distance;
/// assert_eq!(hex_distance(Hex::ZERO, Hex::new(2, -1)), 2);
/// assert_eq!(hex_distance(Hex::new(-3, 0), Hex::new(0, 3)), 6);
/// ```
pub fn hex_distance(a: Hex, b: Hex) -> u32 {
    let dq = a.x - b.x;
    let dr = a.y - b.y;
    let ds = -dq - dr;
    dq.unsigned_abs()
        .max(dr.unsigned_abs())
        .max(ds.unsigned_abs())
}

/// Slack added to a scaled radius before flooring.
///
/// An `f32` factor such as `0.35` is stored slightly below its decimal value,
/// so `20 · 0.35` lands just under `7`. The error stays below `1e-4` for any
/// radius up to the grid cap, while genuine fractional parts of hundredth
/// factors are at least `0.01`.
const FLOOR_SNAP: f64 = 1e-4;

/// `floor(radius · factor)`, saturating at zero for negative products.
///
/// # Examples
/// ```
/// # use hex_arena::math::scaled_radius;
/// assert_eq!(scaled_radius(20, 0.35), 7);
/// assert_eq!(scaled_radius(25, 0.04), 1);
/// assert_eq!(scaled_radius(7, 0.3), 2);
/// ```
pub fn scaled_radius(radius: u32, factor: f32) -> u32 {
    (f64::from(radius) * f64::from(factor) + FLOOR_SNAP).floor() as u32
}

/// `scaled_radius`, falling back to `fallback` when the scaled value is exactly zero.
///
/// Only an exact zero triggers the fallback; `floor(10 · 0.1) = 1` is kept.
pub fn scaled_radius_or(radius: u32, factor: f32, fallback: u32) -> u32 {
    match scaled_radius(radius, factor) {
        0 => fallback,
        scaled => scaled,
    }
}

/// Linear interpolation of a single colour channel, no gamma handling.
pub fn lerp_channel(from: f32, to: f32, t: f32) -> f32 {
    from * (1.0 - t) + to * t
}

/// Derives a border colour from `fill` by mixing toward black (`factor < 0`)
/// or white (`factor >= 0`) with strength `|factor|`.
///
/// # Examples
/// ```
/// # use hex_arena::math::tint_rgb;
/// assert_eq!(tint_rgb([0.2, 0.4, 0.6], 0.0), [0.2, 0.4, 0.6]);
/// assert_eq!(tint_rgb([0.2, 0.4, 0.6], -1.0), [0.0, 0.0, 0.0]);
/// assert_eq!(tint_rgb([0.2, 0.4, 0.6], 1.0), [1.0, 1.0, 1.0]);
/// ```
pub fn tint_rgb(fill: [f32; 3], factor: f32) -> [f32; 3] {
    let t = factor.abs();
    let target = if factor < 0.0 { 0.0 } else { 1.0 };
    fill.map(|channel| lerp_channel(channel, target, t))
}
