//! Scene glue: arena camera framing and clear colour.

use bevy::prelude::*;

use crate::arena::GridConfig;
use crate::math;

/// Background behind the arena.
const CLEAR_COLOR: Color = Color::srgb(0.02, 0.02, 0.03);

/// Marker for the camera looking down on the arena.
#[derive(Component, Reflect)]
pub struct ArenaCamera;

/// Spawns the arena camera and keeps it framing the whole grid.
pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ArenaCamera>()
            .insert_resource(ClearColor(CLEAR_COLOR))
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, frame_camera.run_if(resource_changed::<GridConfig>));
    }
}

/// Camera pose looking at the origin from above, far enough back to fit `cfg.radius` rings.
pub fn camera_transform(cfg: &GridConfig) -> Transform {
    let extent = math::axial_to_world(cfg.radius as i32, 0, cfg.tile_size)
        .x
        .max(cfg.tile_size);
    Transform::from_xyz(0.0, extent * 1.6, extent * 1.1).looking_at(Vec3::ZERO, Vec3::Y)
}

fn spawn_camera(mut commands: Commands, cfg: Res<GridConfig>) {
    commands.spawn((
        Name::new("ArenaCamera"),
        Camera3d::default(),
        camera_transform(&cfg),
        ArenaCamera,
    ));
}

fn frame_camera(cfg: Res<GridConfig>, mut query: Query<&mut Transform, With<ArenaCamera>>) {
    if !cfg.tile_size.is_finite() {
        return;
    }
    for mut transform in &mut query {
        *transform = camera_transform(&cfg);
    }
}
