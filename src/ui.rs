/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides live controls for the fish and bubble
 * behaviour, and the on-screen debug overlay.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// Update the UI; returns whether any control changed
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> bool {
    let before = params.clone();

    let ctx = egui.begin_frame();

    egui::Window::new("Aquarium Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Fish", |ui| {
                ui.add(egui::Slider::new(&mut params.wander_probability, SimulationParams::probability_range()).text("Wander Chance"));
                ui.add(egui::Slider::new(&mut params.steer_factor, SimulationParams::steer_factor_range()).text("Turn Rate"));
                ui.label("Left click the floor to drop food");
            });

            ui.collapsing("Bubbles", |ui| {
                ui.add(egui::Slider::new(&mut params.bubble_spawn_probability, SimulationParams::probability_range()).text("Spawn Chance"));
                ui.add(egui::Slider::new(&mut params.bubble_rise_rate, SimulationParams::rise_rate_range()).text("Rise Rate"));
                ui.add(egui::Slider::new(&mut params.bubble_fade_rate, SimulationParams::fade_rate_range()).text("Fade Rate"));
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Orbit: Right click and drag");
                ui.label("Zoom: Use mouse wheel or trackpad pinch gesture");
            });

            ui.collapsing("Stats", |ui| {
                for line in debug_info.lines() {
                    ui.label(line);
                }
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    *params != before
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect, camera_distance: f32) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 260.0;

    let mut lines = debug_info.lines();
    lines.push(format!("Camera distance: {:.2}", camera_distance));

    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    // Background panel in the top-right corner, clear of the controls
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = panel_x;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
