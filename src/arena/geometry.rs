//! Tile mesh templates and border colour derivation.
//!
//! A tile is a flat two-layer shape: a filled inner hexagon plus a border
//! ring out to the full circumradius. Templates are authored in the XY plane
//! facing `+Z`; instance transforms flip them to face `+Y`.

use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::{HexLayout, HexOrientation, MeshInfo, PlaneMeshBuilder};

use crate::math;

/// Shared shape for every instance of one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshTemplate {
    /// Vertex positions, XY plane.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals (all `+Z`).
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex UVs mapping the tile's bounding square to `[0, 1]²`.
    pub uvs: Vec<[f32; 2]>,
    /// Linear RGBA per vertex, or `None` when the tile is a single colour.
    pub colors: Option<Vec<[f32; 4]>>,
    /// Triangle list, counter-clockwise seen from `+Z`.
    pub indices: Vec<u16>,
}

impl MeshTemplate {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Builds a bevy [`Mesh`] from the template.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone())
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs.clone())
        .with_inserted_indices(Indices::U16(self.indices.clone()));
        if let Some(colors) = &self.colors {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors.clone());
        }
        mesh
    }
}

/// Border colour for `fill`: per-channel lerp toward black (`factor < 0`) or
/// white (`factor >= 0`) by `|factor|`, on the raw sRGB channel values.
/// Alpha is kept from `fill`.
pub fn border_tint(fill: Srgba, factor: f32) -> Srgba {
    let [red, green, blue] = math::tint_rgb([fill.red, fill.green, fill.blue], factor);
    Srgba::new(red, green, blue, fill.alpha)
}

/// Pointy-top layout whose hexagons have circumradius `size`.
fn pointy_layout(size: f32) -> HexLayout {
    HexLayout {
        orientation: HexOrientation::Pointy,
        scale: Vec2::splat(size),
        ..default()
    }
}

/// Builds tile templates for one tile size and border width.
#[derive(Clone, Copy, Debug)]
pub struct TileMeshBuilder {
    size: f32,
    border_width: f32,
}

impl TileMeshBuilder {
    /// `size` is the hex circumradius; `border_width` is the ring width as a fraction of it.
    pub fn new(size: f32, border_width: f32) -> Self {
        Self { size, border_width }
    }

    /// Template filled with `fill`, bordered by `border_tint(fill, border_factor)`.
    ///
    /// With a zero border width the ring is dropped and the template carries
    /// no vertex colours; the instance colour paints it.
    pub fn build(&self, fill: Srgba, border_factor: f32) -> MeshTemplate {
        if self.border_width <= 0.0 {
            return self.plain();
        }
        let fill_rgba = LinearRgba::from(fill).to_f32_array();
        let border_rgba = LinearRgba::from(border_tint(fill, border_factor)).to_f32_array();

        let outer = pointy_layout(self.size).center_aligned_hex_corners();
        let inner_size = self.size * (1.0 - self.border_width);
        let inner = pointy_layout(inner_size).center_aligned_hex_corners();

        // 0: centre, 1..=6: inner fill corners, 7..=12: inner border corners,
        // 13..=18: outer border corners.
        let mut points = Vec::with_capacity(19);
        points.push(Vec2::ZERO);
        points.extend(inner);
        points.extend(inner);
        points.extend(outer);

        let mut colors = vec![fill_rgba; 7];
        colors.extend([border_rgba; 12]);

        let mut indices = Vec::with_capacity(54);
        for i in 0..6u16 {
            let next = (i + 1) % 6;
            indices.extend([0, 1 + i, 1 + next]);
        }
        for i in 0..6u16 {
            let next = (i + 1) % 6;
            let (a, b) = (7 + i, 7 + next);
            let (c, d) = (13 + i, 13 + next);
            indices.extend([a, c, d, a, d, b]);
        }

        MeshTemplate {
            colors: Some(colors),
            indices,
            ..self.flat(&points)
        }
    }

    /// Single-colour hexagon with no border ring, straight from hexx.
    fn plain(&self) -> MeshTemplate {
        let layout = pointy_layout(self.size);
        let MeshInfo {
            vertices,
            normals,
            uvs,
            indices,
        } = PlaneMeshBuilder::new(&layout)
            .facing(Vec3::Z)
            .center_aligned()
            .build();
        MeshTemplate {
            positions: vertices.iter().map(|v| v.to_array()).collect(),
            normals: normals.iter().map(|n| n.to_array()).collect(),
            uvs: uvs.iter().map(|uv| uv.to_array()).collect(),
            colors: None,
            indices,
        }
    }

    /// Positions, normals and UVs for `points` in the XY plane.
    fn flat(&self, points: &[Vec2]) -> MeshTemplate {
        let extent = 2.0 * self.size;
        MeshTemplate {
            positions: points.iter().map(|p| [p.x, p.y, 0.0]).collect(),
            normals: vec![[0.0, 0.0, 1.0]; points.len()],
            uvs: points
                .iter()
                .map(|p| [p.x / extent + 0.5, p.y / extent + 0.5])
                .collect(),
            colors: None,
            indices: Vec::new(),
        }
    }
}
