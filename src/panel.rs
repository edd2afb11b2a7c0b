//! Parameter-tweaking control panel.
//!
//! Edits a draft copy of [`GridConfig`] each frame and writes it back only
//! when something actually changed, so idle frames never trigger a rebuild.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::arena::{ArenaLayers, GridConfig, MAX_BORDER_WIDTH};

/// Adds the arena control panel window.
pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, control_panel_ui);
    }
}

/// Draws the panel and applies edits to [`GridConfig`].
pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut cfg: ResMut<GridConfig>,
    layers: Res<ArenaLayers>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let mut draft = cfg.clone();

    egui::Window::new("Arena")
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            grid_controls(ui, &mut draft);

            ui.separator();
            let radii = draft.resolve();
            ui.label(format!(
                "base {} / arena {} / path {}",
                radii.base, radii.arena, radii.path_width
            ));
            ui.label(format!(
                "{} layers, {} tiles",
                layers.0.layers().len(),
                layers.0.instance_count()
            ));
        });

    if cfg.set_if_neq(draft) {
        debug!("arena config edited");
    }
    Ok(())
}

/// Sliders, toggles and colour pickers for every editable field.
///
/// Sliders only clamp what the user types or drags, so a value set outside a
/// slider's range (from the command line, say) survives until it is edited.
fn grid_controls(ui: &mut egui::Ui, draft: &mut GridConfig) {
    ui.add(slider(&mut draft.radius, 5..=50).text("grid radius"));
    ui.add(slider(&mut draft.base_scale_factor, 0.1..=0.5).text("base scale"));
    ui.add(slider(&mut draft.path_scale_factor, 0.01..=0.1).text("path scale"));
    ui.add(slider(&mut draft.arena_scale_factor, 0.1..=0.5).text("arena scale"));

    ui.separator();
    ui.add(slider(&mut draft.border_color_factor, -1.0..=1.0).text("border tint"));
    ui.add(slider(&mut draft.border_width, 0.0..=MAX_BORDER_WIDTH).text("border width"));
    ui.checkbox(&mut draft.render_empty, "render empty tiles");

    ui.separator();
    color_row(ui, "map", &mut draft.map_color);
    color_row(ui, "arena", &mut draft.arena_color);
    color_row(ui, "path", &mut draft.path_color);
    for (i, color) in draft.base_colors.iter_mut().enumerate() {
        color_row(ui, &format!("base {i}"), color);
    }
}

fn slider<Num: egui::emath::Numeric>(
    value: &mut Num,
    range: std::ops::RangeInclusive<Num>,
) -> egui::Slider<'_> {
    egui::Slider::new(value, range).clamping(egui::SliderClamping::Edits)
}

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Srgba) {
    ui.horizontal(|ui| {
        let mut rgb = [color.red, color.green, color.blue];
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            [color.red, color.green, color.blue] = rgb;
        }
        ui.label(label);
    });
}
