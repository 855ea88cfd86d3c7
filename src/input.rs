/*
 * Input Module
 *
 * This module handles user input events for the aquarium.
 *
 * Features:
 * - Left click on the floor drops food for the fish
 * - Right drag orbits the camera around the tank
 * - Mouse wheel zooms in and out
 * - Clicks over the UI panel are left to egui
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};
use tracing::trace;

use crate::app::Model;
use crate::camera::OrbitCamera;

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    if model.sim.camera.is_dragging {
        model.sim.camera.drag(pos);
        model.render_needed.set(true);
    }

    model.mouse_position = pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    match button {
        MouseButton::Left => {
            let ndc = OrbitCamera::screen_to_ndc(model.mouse_position, app.window_rect());
            trace!(x = ndc.x, y = ndc.y, "pointer click");
            model.sim.set_food_from_ndc(ndc);
            model.render_needed.set(true);
        }
        MouseButton::Right => {
            model.sim.camera.start_drag(model.mouse_position);
        }
        _ => {}
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Right {
        model.sim.camera.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let amount = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
    };

    model.sim.camera.zoom(amount);
    model.render_needed.set(true);
}

// Pass raw window events through to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);

    if let nannou::winit::event::WindowEvent::MouseInput { .. } = event {
        model.render_needed.set(true);
    }
}
