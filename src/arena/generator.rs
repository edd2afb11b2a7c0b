//! One-shot generation: config in, instanced layer batches out.

use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use hexx::Hex;

use super::geometry::{MeshTemplate, TileMeshBuilder};
use super::hex_layout::ArenaHexLayout;
use super::regions::{Region, RegionClassifier};
use super::{GridConfig, InvalidConfig};

/// One classified tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Axial coordinate.
    pub hex: Hex,
    /// World-space `(x, z)` centre.
    pub world_pos: Vec2,
    /// Assigned region.
    pub region: Region,
}

/// All instances of one region (base anchors are separate layers), sharing
/// one mesh template.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerBatch {
    /// Region, carrying the anchor index for bases.
    pub region: Region,
    /// Shape shared by every instance.
    pub template: MeshTemplate,
    /// Per-instance transform: translation to the tile centre plus the fixed face-up flip.
    pub transforms: Vec<Transform>,
    /// Per-instance fill colour.
    pub colors: Vec<Srgba>,
    /// Source coordinate of each instance, parallel to `transforms`.
    pub hexes: Vec<Hex>,
}

impl LayerBatch {
    /// Number of instances in the batch.
    pub fn instance_count(&self) -> usize {
        self.transforms.len()
    }
}

/// Rotation turning an XY-plane template (`+Z` normal) to face `+Y`.
pub fn face_up() -> Quat {
    Quat::from_rotation_x(-FRAC_PI_2)
}

/// Enumerates and classifies every cell within `cfg.radius`.
pub fn generate_cells(cfg: &GridConfig) -> Result<Vec<Cell>, InvalidConfig> {
    cfg.validate()?;
    let layout = ArenaHexLayout::new(cfg.tile_size);
    let classifier = RegionClassifier::new(cfg);
    Ok(ArenaHexLayout::hexagon(cfg.radius)
        .map(|hex| Cell {
            hex,
            world_pos: layout.hex_to_world_pos(hex),
            region: classifier.classify(hex),
        })
        .collect())
}

/// Generates one [`LayerBatch`] per occupied region, in region order.
///
/// Empty cells only get a batch when `cfg.render_empty` is set.
pub fn generate(cfg: &GridConfig) -> Result<Vec<LayerBatch>, InvalidConfig> {
    let cells = generate_cells(cfg)?;

    let mut groups: BTreeMap<Region, Vec<Cell>> = BTreeMap::new();
    for cell in cells {
        if cell.region == Region::Empty && !cfg.render_empty {
            continue;
        }
        groups.entry(cell.region).or_default().push(cell);
    }

    let builder = TileMeshBuilder::new(cfg.tile_size, cfg.border_width);
    let rotation = face_up();
    Ok(groups
        .into_iter()
        .map(|(region, cells)| {
            let fill = cfg.fill_color(region);
            LayerBatch {
                region,
                template: builder.build(fill, cfg.border_color_factor),
                transforms: cells
                    .iter()
                    .map(|c| {
                        Transform::from_xyz(c.world_pos.x, 0.0, c.world_pos.y)
                            .with_rotation(rotation)
                    })
                    .collect(),
                colors: vec![fill; cells.len()],
                hexes: cells.iter().map(|c| c.hex).collect(),
            }
        })
        .collect())
}
