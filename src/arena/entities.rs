use bevy::prelude::*;
use hexx::Hex;

use super::lifecycle::GridLifecycle;
use super::regions::Region;

/// Marker on each instanced tile entity (child of an [`ArenaLayer`]).
#[derive(Component, Reflect)]
pub struct ArenaTile {
    /// The hex coordinate this tile represents.
    pub hex: Hex,
    /// Region the tile was classified into.
    pub region: Region,
}

/// Root entity of one layer batch; parents all its [`ArenaTile`]s.
#[derive(Component, Reflect)]
pub struct ArenaLayer {
    /// Region of every tile in the layer.
    pub region: Region,
}

/// Renderer-side resources of one uploaded layer.
#[derive(Debug)]
pub struct SpawnedLayer {
    /// Layer root; despawning it removes every tile.
    pub root: Entity,
    /// Mesh shared by every tile in the layer.
    pub mesh: Handle<Mesh>,
    /// Material shared by every tile in the layer.
    pub material: Handle<StandardMaterial>,
}

/// Owns the spawned arena layers between regenerations.
#[derive(Resource, Default)]
pub struct ArenaLayers(pub GridLifecycle<SpawnedLayer>);
