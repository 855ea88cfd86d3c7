/*
 * Application Module
 *
 * This module defines the nannou application model for the aquarium.
 * It owns the simulation and the frame driver, and runs exactly one
 * simulation tick per display refresh: no fixed-timestep catch-up and no
 * skipped ticks, so a slow frame simply delays the next one.
 */

use std::cell::Cell;
use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::debug::DebugInfo;
use crate::driver::FrameDriver;
use crate::input::{mouse_moved, mouse_pressed, mouse_released, mouse_wheel, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;

// Settings handed from the command line to the nannou model function
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub params: SimulationParams,
    pub seed: u64,
}

static LAUNCH_OPTIONS: OnceLock<LaunchOptions> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub sim: Simulation,
    pub driver: FrameDriver,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub mouse_position: Vec2,
    // Cleared by the view once drawn; anything that changes the picture sets it
    pub render_needed: Cell<bool>,
}

// Open the window and run until it is closed
pub fn launch(options: LaunchOptions) {
    if LAUNCH_OPTIONS.set(options).is_err() {
        warn!("aquarium already launched; ignoring new launch options");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let options = LAUNCH_OPTIONS.get().cloned().unwrap_or_else(|| LaunchOptions {
        params: SimulationParams::default(),
        seed: 0,
    });

    // Size the window at 80% of the monitor when one is available
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 720.0));

    let window_id = app
        .new_window()
        .title("Aquarium")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the aquarium window");

    let window = app.window(window_id).expect("aquarium window closed during setup");
    let egui = Egui::from_window(&window);

    let mut sim = Simulation::new(options.params, options.seed);
    sim.camera.set_viewport(window.rect());

    info!(width = window_width, height = window_height, "window opened");

    Model {
        sim,
        driver: FrameDriver::new(),
        egui,
        debug_info: DebugInfo::default(),
        mouse_position: Vec2::ZERO,
        render_needed: Cell::new(true),
    }
}

// Update the model once per display refresh
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.sim.camera.set_viewport(app.window_rect());

    if ui::update_ui(&mut model.egui, &mut model.sim.params, &model.debug_info) {
        model.render_needed.set(true);
    }

    if !model.sim.params.pause_simulation {
        let render_needed = &model.render_needed;
        model.driver.step(&mut model.sim, &mut |_: &Simulation| render_needed.set(true));
    }

    model.debug_info.record(&model.sim, model.driver.ticks());
}
