use bevy::app::AppExit;
use bevy::prelude::*;

use super::GridConfig;
use super::entities::{ArenaLayer, ArenaLayers, ArenaTile, SpawnedLayer};
use super::generator::LayerBatch;
use super::lifecycle::LayerSink;

/// Uploads layer batches as one mesh, one material, and one entity per tile.
pub struct BevyLayerSink<'a, 'w, 's> {
    pub(super) commands: &'a mut Commands<'w, 's>,
    pub(super) meshes: &'a mut Assets<Mesh>,
    pub(super) materials: &'a mut Assets<StandardMaterial>,
}

impl LayerSink for BevyLayerSink<'_, '_, '_> {
    type Handle = SpawnedLayer;

    fn upload(&mut self, batch: &LayerBatch) -> SpawnedLayer {
        let mesh = self.meshes.add(batch.template.to_mesh());
        // Vertex colours already carry fill and border; plain tiles take the instance colour.
        let base_color = match (&batch.template.colors, batch.colors.first()) {
            (None, Some(&fill)) => Color::from(fill),
            _ => Color::WHITE,
        };
        let material = self.materials.add(StandardMaterial {
            base_color,
            unlit: true,
            ..default()
        });

        let root = self
            .commands
            .spawn((
                ArenaLayer {
                    region: batch.region,
                },
                Name::new(format!("ArenaLayer({})", batch.region)),
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        let tiles: Vec<Entity> = batch
            .hexes
            .iter()
            .zip(&batch.transforms)
            .map(|(&hex, &transform)| {
                self.commands
                    .spawn((
                        ArenaTile {
                            hex,
                            region: batch.region,
                        },
                        Name::new(format!("Tile({},{})", hex.x, hex.y)),
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        transform,
                    ))
                    .id()
            })
            .collect();
        self.commands.entity(root).add_children(&tiles);

        debug!(
            "uploaded layer {} with {} tiles",
            batch.region,
            batch.instance_count()
        );
        SpawnedLayer {
            root,
            mesh,
            material,
        }
    }

    fn release(&mut self, handle: SpawnedLayer) {
        self.commands.entity(handle.root).despawn();
        self.meshes.remove(&handle.mesh);
        self.materials.remove(&handle.material);
    }
}

// ── Update ──────────────────────────────────────────────────────────

/// Rebuilds every arena layer from the current [`GridConfig`].
///
/// A rejected config keeps the previous layers on screen.
pub fn regenerate_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GridConfig>,
    mut layers: ResMut<ArenaLayers>,
) {
    let mut sink = BevyLayerSink {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
    };
    match layers.0.regenerate(&cfg, &mut sink) {
        Ok(owned) => info!(
            "arena radius {} rebuilt: {} layers",
            cfg.radius,
            owned.len()
        ),
        Err(err) => warn!("arena config rejected, keeping previous layers: {err}"),
    }
}

// ── Last ────────────────────────────────────────────────────────────

/// Releases all arena layers when the app is exiting.
pub fn dispose_arena_on_exit(
    mut exit: MessageReader<AppExit>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut layers: ResMut<ArenaLayers>,
) {
    if exit.read().next().is_none() || layers.0.is_empty() {
        return;
    }
    let mut sink = BevyLayerSink {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
    };
    layers.0.dispose(&mut sink);
    info!("arena layers released");
}

#[cfg(test)]
mod tests {
    use bevy::asset::AssetPlugin;

    use super::*;
    use crate::arena::{ArenaPlugin, Region, generate_cells};

    fn headless_app(cfg: GridConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<Mesh>();
        app.init_asset::<StandardMaterial>();
        app.add_plugins(ArenaPlugin(cfg));
        app
    }

    fn tile_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&ArenaTile>().iter(world).count()
    }

    fn layer_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&ArenaLayer>().iter(world).count()
    }

    fn non_empty_cells(cfg: &GridConfig) -> usize {
        generate_cells(cfg)
            .unwrap()
            .iter()
            .filter(|c| c.region != Region::Empty)
            .count()
    }

    #[test]
    fn first_update_spawns_all_layers() {
        let cfg = GridConfig::default();
        let mut app = headless_app(cfg.clone());
        app.update();

        assert_eq!(tile_count(&mut app), non_empty_cells(&cfg));
        let layers = app.world().resource::<ArenaLayers>().0.layers().len();
        assert_eq!(layer_count(&mut app), layers);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), layers);
        assert_eq!(
            app.world().resource::<Assets<StandardMaterial>>().len(),
            layers
        );
    }

    #[test]
    fn unchanged_config_does_not_rebuild() {
        let mut app = headless_app(GridConfig::default());
        app.update();
        app.update();
        assert_eq!(app.world().resource::<ArenaLayers>().0.generation(), 1);
    }

    #[test]
    fn shrinking_radius_replaces_every_tile() {
        let mut app = headless_app(GridConfig {
            radius: 25,
            ..default()
        });
        app.update();

        let small = GridConfig {
            radius: 6,
            ..default()
        };
        *app.world_mut().resource_mut::<GridConfig>() = small.clone();
        app.update();

        assert_eq!(tile_count(&mut app), non_empty_cells(&small));
        let layers = app.world().resource::<ArenaLayers>().0.layers().len();
        assert_eq!(layer_count(&mut app), layers);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), layers);
    }

    #[test]
    fn rejected_config_keeps_tiles() {
        let cfg = GridConfig::default();
        let mut app = headless_app(cfg.clone());
        app.update();

        app.world_mut()
            .resource_mut::<GridConfig>()
            .border_color_factor = f32::NAN;
        app.update();

        assert_eq!(tile_count(&mut app), non_empty_cells(&cfg));
        assert_eq!(app.world().resource::<ArenaLayers>().0.generation(), 1);
    }

    #[test]
    fn exit_releases_layers_and_assets() {
        let mut app = headless_app(GridConfig::default());
        app.update();

        app.world_mut().write_message(AppExit::Success);
        app.update();

        assert!(app.world().resource::<ArenaLayers>().0.is_empty());
        assert_eq!(tile_count(&mut app), 0);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
        assert_eq!(app.world().resource::<Assets<StandardMaterial>>().len(), 0);
    }
}
