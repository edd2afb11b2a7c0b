//! Arena grid: region classification, tile geometry, and layer lifecycle.
//!
//! The pure pipeline (`hex_layout` → `regions` → `geometry` → `generator`)
//! turns a [`GridConfig`] into [`LayerBatch`]es. `lifecycle` owns the batches
//! between regenerations, and the plugin systems hand them to the renderer.

mod entities;
mod error;
pub mod generator;
pub mod geometry;
pub mod hex_layout;
pub mod lifecycle;
pub mod regions;
mod systems;

pub use entities::{ArenaLayer, ArenaLayers, ArenaTile, SpawnedLayer};
pub use error::InvalidConfig;
pub use generator::{Cell, LayerBatch, generate, generate_cells};
pub use regions::Region;

use bevy::prelude::*;

use crate::math;

/// Largest grid radius accepted by a single generation pass.
pub const MAX_GRID_RADIUS: u32 = 512;

/// Arena fallback: `floor(radius · 0.5)` when the scaled arena radius is zero.
pub const ARENA_FALLBACK_FACTOR: f32 = 0.5;
/// Base fallback: `floor(radius · 0.3)` when the scaled base radius is zero.
pub const BASE_FALLBACK_FACTOR: f32 = 0.3;
/// Path half-width used when the scaled width is zero.
pub const PATH_FALLBACK_WIDTH: u32 = 2;
/// Widest accepted border ring, as a fraction of the tile size.
pub const MAX_BORDER_WIDTH: f32 = 0.9;

/// Arena generation settings, supplied wholesale by the control panel or CLI.
#[derive(Resource, Clone, Debug, PartialEq, Reflect)]
pub struct GridConfig {
    /// Number of hex rings around the origin.
    pub radius: u32,
    /// Base region radius = `floor(radius · factor)`.
    pub base_scale_factor: f32,
    /// Path half-width = `floor(radius · factor)`.
    pub path_scale_factor: f32,
    /// Central arena radius = `floor(radius · factor)`.
    pub arena_scale_factor: f32,
    /// Border tint in `[-1, 1]`: negative darkens toward black, positive lightens toward white.
    pub border_color_factor: f32,
    /// Fill for background (empty) tiles.
    pub map_color: Srgba,
    /// Fill for the central arena.
    pub arena_color: Srgba,
    /// Fill for corridors linking bases to the arena.
    pub path_color: Srgba,
    /// Fill per base anchor, in anchor index order.
    pub base_colors: [Srgba; 3],
    /// Hex circumradius (edge length) in world units.
    pub tile_size: f32,
    /// Border ring width as a fraction of `tile_size`. Zero drops the ring.
    pub border_width: f32,
    /// Whether empty background tiles get geometry.
    pub render_empty: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 20,
            base_scale_factor: 0.2,
            path_scale_factor: 0.05,
            arena_scale_factor: 0.25,
            border_color_factor: -0.35,
            map_color: Srgba::rgb(0.16, 0.18, 0.2),
            arena_color: Srgba::rgb(0.85, 0.68, 0.25),
            path_color: Srgba::rgb(0.55, 0.47, 0.36),
            base_colors: [
                Srgba::rgb(0.85, 0.25, 0.25),
                Srgba::rgb(0.25, 0.7, 0.3),
                Srgba::rgb(0.25, 0.4, 0.85),
            ],
            tile_size: 1.0,
            border_width: 0.12,
            render_empty: false,
        }
    }
}

/// Region extents resolved from a [`GridConfig`]. A zero extent means the region is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct RegionRadii {
    /// Hex distance from each anchor still counted as that base.
    pub base: u32,
    /// Hex distance from the origin still counted as arena.
    pub arena: u32,
    /// Hex distance from a corridor point still counted as path.
    pub path_width: u32,
}

impl GridConfig {
    /// Checks every float for finiteness and range, and the radius against
    /// [`MAX_GRID_RADIUS`].
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.radius > MAX_GRID_RADIUS {
            return Err(InvalidConfig::RadiusTooLarge {
                radius: self.radius,
                max: MAX_GRID_RADIUS,
            });
        }
        check_range("base_scale_factor", self.base_scale_factor, 0.0, 1.0)?;
        check_range("path_scale_factor", self.path_scale_factor, 0.0, 1.0)?;
        check_range("arena_scale_factor", self.arena_scale_factor, 0.0, 1.0)?;
        check_range("border_color_factor", self.border_color_factor, -1.0, 1.0)?;
        check_range("border_width", self.border_width, 0.0, MAX_BORDER_WIDTH)?;
        check_finite("tile_size", self.tile_size)?;
        if self.tile_size <= 0.0 {
            return Err(InvalidConfig::OutOfRange {
                field: "tile_size",
                value: self.tile_size,
                min: f32::EPSILON,
                max: f32::MAX,
            });
        }
        check_color("map_color", self.map_color)?;
        check_color("arena_color", self.arena_color)?;
        check_color("path_color", self.path_color)?;
        for color in self.base_colors {
            check_color("base_colors", color)?;
        }
        Ok(())
    }

    /// Resolves region extents with the zero-fallback rule.
    ///
    /// Fallbacks apply only when the scaled value floors to exactly zero, and
    /// the arena/base fallbacks are floored as well (`radius = 1` still
    /// resolves both to zero).
    pub fn resolve(&self) -> RegionRadii {
        let r = self.radius;
        RegionRadii {
            base: math::scaled_radius_or(
                r,
                self.base_scale_factor,
                math::scaled_radius(r, BASE_FALLBACK_FACTOR),
            ),
            arena: math::scaled_radius_or(
                r,
                self.arena_scale_factor,
                math::scaled_radius(r, ARENA_FALLBACK_FACTOR),
            ),
            path_width: math::scaled_radius_or(r, self.path_scale_factor, PATH_FALLBACK_WIDTH),
        }
    }

    /// Fill colour of `region`.
    pub fn fill_color(&self, region: Region) -> Srgba {
        match region {
            Region::Base(index) => self.base_colors[usize::from(index)],
            Region::Arena => self.arena_color,
            Region::Path => self.path_color,
            Region::Empty => self.map_color,
        }
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), InvalidConfig> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfig::NonFinite { field, value })
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), InvalidConfig> {
    check_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InvalidConfig::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn check_color(field: &'static str, color: Srgba) -> Result<(), InvalidConfig> {
    [color.red, color.green, color.blue, color.alpha]
        .into_iter()
        .try_for_each(|channel| check_finite(field, channel))
}

/// Arena plugin: rebuilds the tile layers whenever [`GridConfig`] changes.
pub struct ArenaPlugin(pub GridConfig);

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GridConfig>()
            .register_type::<RegionRadii>()
            .register_type::<Region>()
            .register_type::<ArenaTile>()
            .register_type::<ArenaLayer>()
            .insert_resource(self.0.clone())
            .init_resource::<ArenaLayers>()
            .add_systems(
                Update,
                systems::regenerate_arena.run_if(resource_changed::<GridConfig>),
            )
            .add_systems(Last, systems::dispose_arena_on_exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_factors(radius: u32, base: f32, arena: f32, path: f32) -> GridConfig {
        GridConfig {
            radius,
            base_scale_factor: base,
            arena_scale_factor: arena,
            path_scale_factor: path,
            ..default()
        }
    }

    // ── validate ────────────────────────────────────────────────────

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GridConfig::default().validate(), Ok(()));
    }

    #[test]
    fn nan_scale_factor_is_rejected() {
        let cfg = with_factors(10, f32::NAN, 0.2, 0.05);
        assert!(matches!(
            cfg.validate(),
            Err(InvalidConfig::NonFinite {
                field: "base_scale_factor",
                ..
            })
        ));
    }

    #[test]
    fn infinite_tile_size_is_rejected() {
        let cfg = GridConfig {
            tile_size: f32::INFINITY,
            ..default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(InvalidConfig::NonFinite {
                field: "tile_size",
                ..
            })
        ));
    }

    #[test]
    fn border_factor_outside_unit_range_is_rejected() {
        let cfg = GridConfig {
            border_color_factor: 1.5,
            ..default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(InvalidConfig::OutOfRange {
                field: "border_color_factor",
                ..
            })
        ));
    }

    #[test]
    fn border_width_accepts_up_to_max() {
        let widest = GridConfig {
            border_width: MAX_BORDER_WIDTH,
            ..default()
        };
        assert_eq!(widest.validate(), Ok(()));

        let too_wide = GridConfig {
            border_width: 0.95,
            ..default()
        };
        assert!(matches!(
            too_wide.validate(),
            Err(InvalidConfig::OutOfRange {
                field: "border_width",
                ..
            })
        ));
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let cfg = GridConfig {
            tile_size: 0.0,
            ..default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_color_channel_is_rejected() {
        let mut cfg = GridConfig::default();
        cfg.base_colors[2].green = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(InvalidConfig::NonFinite {
                field: "base_colors",
                ..
            })
        ));
    }

    #[test]
    fn oversized_radius_is_rejected() {
        let cfg = GridConfig {
            radius: MAX_GRID_RADIUS + 1,
            ..default()
        };
        assert_eq!(
            cfg.validate(),
            Err(InvalidConfig::RadiusTooLarge {
                radius: MAX_GRID_RADIUS + 1,
                max: MAX_GRID_RADIUS
            })
        );
    }

    // ── resolve ─────────────────────────────────────────────────────

    #[test]
    fn resolve_scales_and_floors() {
        let radii = with_factors(20, 0.2, 0.25, 0.05).resolve();
        assert_eq!(
            radii,
            RegionRadii {
                base: 4,
                arena: 5,
                path_width: 1
            }
        );
    }

    #[test]
    fn zero_path_width_falls_back_to_constant() {
        // floor(40 · 0.01) = 0 → literal 2, not radius-scaled.
        assert_eq!(with_factors(40, 0.2, 0.2, 0.01).resolve().path_width, 2);
        assert_eq!(with_factors(5, 0.2, 0.2, 0.01).resolve().path_width, 2);
    }

    #[test]
    fn zero_region_radii_fall_back_to_radius_scaled() {
        let radii = with_factors(20, 0.0, 0.0, 0.05).resolve();
        assert_eq!(radii.base, 6);
        assert_eq!(radii.arena, 10);
    }

    #[test]
    fn small_nonzero_products_do_not_fall_back() {
        // floor(10 · 0.1) = 1, kept as-is.
        let radii = with_factors(10, 0.1, 0.1, 0.1).resolve();
        assert_eq!(radii.base, 1);
        assert_eq!(radii.arena, 1);
        assert_eq!(radii.path_width, 1);
    }

    #[test]
    fn decimal_factors_floor_to_their_exact_product() {
        // 0.35 and 0.45 are stored just under their decimal value as f32.
        assert_eq!(with_factors(20, 0.35, 0.45, 0.05).resolve().base, 7);
        assert_eq!(with_factors(20, 0.35, 0.45, 0.05).resolve().arena, 9);
    }

    #[test]
    fn exact_unit_path_width_skips_fallback() {
        // floor(25 · 0.04) = 1, so the literal 2 must not kick in.
        assert_eq!(with_factors(25, 0.2, 0.2, 0.04).resolve().path_width, 1);
    }

    #[test]
    fn radius_one_fallbacks_floor_to_zero() {
        let radii = with_factors(1, 0.01, 0.01, 0.01).resolve();
        assert_eq!(radii.base, 0);
        assert_eq!(radii.arena, 0);
        assert_eq!(radii.path_width, 2);
    }

    // ── fill_color ──────────────────────────────────────────────────

    #[test]
    fn base_fill_follows_anchor_index() {
        let cfg = GridConfig::default();
        for i in 0..3u8 {
            assert_eq!(cfg.fill_color(Region::Base(i)), cfg.base_colors[i as usize]);
        }
        assert_eq!(cfg.fill_color(Region::Empty), cfg.map_color);
    }
}
