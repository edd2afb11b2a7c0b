#![warn(missing_docs)]
//! Hex arena viewer.
//!
//! Renders the arena grid with an egui control panel for live tweaking.
//! Tab toggles the world inspector, Esc quits.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use hex_arena::GameState;
use hex_arena::arena::{ArenaPlugin, GridConfig};
use hex_arena::panel::ControlPanelPlugin;
use hex_arena::stage::StagePlugin;

/// Command-line overrides for the initial [`GridConfig`].
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Hex arena grid viewer")]
struct Cli {
    /// Number of hex rings around the origin.
    #[arg(long)]
    radius: Option<u32>,
    /// Base region radius as a fraction of the grid radius.
    #[arg(long)]
    base_scale: Option<f32>,
    /// Path half-width as a fraction of the grid radius.
    #[arg(long)]
    path_scale: Option<f32>,
    /// Arena radius as a fraction of the grid radius.
    #[arg(long)]
    arena_scale: Option<f32>,
    /// Border tint in [-1, 1]; negative darkens, positive lightens.
    #[arg(long, allow_hyphen_values = true)]
    border_factor: Option<f32>,
    /// Give empty background tiles geometry too.
    #[arg(long)]
    render_empty: bool,
}

#[cfg(feature = "native")]
impl Cli {
    fn apply(self, mut cfg: GridConfig) -> GridConfig {
        if let Some(radius) = self.radius {
            cfg.radius = radius;
        }
        if let Some(f) = self.base_scale {
            cfg.base_scale_factor = f;
        }
        if let Some(f) = self.path_scale {
            cfg.path_scale_factor = f;
        }
        if let Some(f) = self.arena_scale {
            cfg.arena_scale_factor = f;
        }
        if let Some(f) = self.border_factor {
            cfg.border_color_factor = f;
        }
        cfg.render_empty |= self.render_empty;
        cfg
    }
}

#[cfg(feature = "native")]
fn initial_config() -> GridConfig {
    use clap::Parser;
    Cli::parse().apply(GridConfig::default())
}

#[cfg(not(feature = "native"))]
fn initial_config() -> GridConfig {
    GridConfig::default()
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Arena".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(ArenaPlugin(initial_config()))
    .add_plugins(StagePlugin)
    .add_plugins(ControlPanelPlugin)
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Inspecting)));

    #[cfg(feature = "native")]
    app.add_plugins((RemotePlugin::default(), RemoteHttpPlugin::default()));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Running => GameState::Inspecting,
            GameState::Inspecting => GameState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
