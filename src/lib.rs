#![warn(missing_docs)]
//! Hex arena grid generation.
//!
//! Classifies every tile of a hexagonal arena into bases, corridors, a
//! central arena, and background, then builds one instanced mesh layer per
//! region. The bevy plugins rebuild the layers whenever the configuration
//! changes.

pub mod arena;
pub mod math;
pub mod panel;
pub mod stage;

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Arena view with the control panel.
    #[default]
    Running,
    /// World inspector overlay active (Tab to toggle).
    Inspecting,
}
