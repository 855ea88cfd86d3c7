/*
 * Renderer Module
 *
 * This module draws the aquarium. The world is 3D, so every element is
 * projected through the orbit camera onto nannou's 2D draw surface and
 * painted back to front: floor and caustics, corals, food, fish, bubbles,
 * and finally the translucent water surface.
 *
 * Nothing here mutates the simulation.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::camera::OrbitCamera;
use crate::fish::Fish;
use crate::scene::{Floor, CORAL_COLOR, FISH_BODY_COLOR, FISH_TAIL_COLOR, FLOOR_COLOR, OCEAN_BLUE};
use crate::ui;

const FISH_BODY_RADIUS: f32 = 0.3;
const FISH_TAIL_LENGTH: f32 = 0.4;
const FISH_TAIL_HALF_WIDTH: f32 = 0.2;
const BUBBLE_RADIUS: f32 = 0.08;
const FOOD_RADIUS: f32 = 0.08;
const CAUSTIC_LINES: usize = 24;
const AMBIENT_LIGHT: f32 = 0.4;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Skip the scene when nothing has changed since the last draw
    if !model.render_needed.get() {
        draw_ui(model, &frame);
        return;
    }

    let draw = app.draw();
    let window_rect = app.window_rect();
    let sim = &model.sim;
    let camera = &sim.camera;
    let environment = sim.environment();

    draw.background().color(rgb8(OCEAN_BLUE.0, OCEAN_BLUE.1, OCEAN_BLUE.2));

    let floor = &sim.scene().floor;
    draw_floor(&draw, camera, floor, window_rect);
    draw_caustics(&draw, camera, floor, environment.caustics_offset, window_rect);

    for coral in &sim.scene().corals {
        if let Some(centre) = camera.world_to_screen(coral.position, window_rect) {
            let radius = projected_radius(camera, coral.position, coral.radius, window_rect);
            draw.ellipse()
                .xy(centre)
                .radius(radius)
                .rotate(coral.rotation)
                .resolution(6.0)
                .color(shade(CORAL_COLOR, 1.0, 1.0));
        }
    }

    if let Some(marker) = sim.food().marker_position(sim.params.food_marker_offset) {
        if let Some(centre) = camera.world_to_screen(marker, window_rect) {
            let radius = projected_radius(camera, marker, FOOD_RADIUS, window_rect);
            draw.ellipse().xy(centre).radius(radius).color(rgb8(0x8b, 0x5a, 0x2b));
        }
    }

    // Farthest fish first so nearer ones overlap them
    let mut school: Vec<&Fish> = sim.fish().iter().collect();
    let eye = camera.eye();
    school.sort_by(|a, b| {
        b.position
            .distance_squared(eye)
            .partial_cmp(&a.position.distance_squared(eye))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for fish in school {
        let light = lighting(fish.position, environment.light_position);
        draw_fish(&draw, camera, fish, light, window_rect);
    }

    for bubble in sim.bubbles().bubbles() {
        if let Some(centre) = camera.world_to_screen(bubble.position, window_rect) {
            let radius = projected_radius(camera, bubble.position, BUBBLE_RADIUS, window_rect);
            draw.ellipse()
                .xy(centre)
                .radius(radius)
                .no_fill()
                .stroke_weight(1.5)
                .stroke(rgba(1.0, 1.0, 1.0, bubble.opacity));
        }
    }

    draw_water_surface(&draw, camera, floor, environment.water_height, window_rect);

    if sim.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, camera.distance);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!("failed to draw scene: {err:?}");
    }
    draw_ui(model, &frame);

    model.render_needed.set(false);
}

fn draw_ui(model: &Model, frame: &Frame) {
    if let Err(err) = model.egui.draw_to_frame(frame) {
        warn!("failed to draw ui: {err:?}");
    }
}

fn draw_floor(draw: &Draw, camera: &OrbitCamera, floor: &Floor, window_rect: Rect) {
    if let Some(points) = project_all(camera, &floor.corners(), window_rect) {
        draw.polygon().points(points).color(shade(FLOOR_COLOR, 1.0, 1.0));
    }
}

// Shimmering grid of light lines across the floor, scrolled by the texture offset
fn draw_caustics(draw: &Draw, camera: &OrbitCamera, floor: &Floor, offset: Vec2, window_rect: Rect) {
    let half = floor.half_size();
    let spacing = floor.size / CAUSTIC_LINES as f32;
    let y = floor.height + 0.01;
    let color = rgba(0.7, 0.9, 1.0, 0.12);

    for i in 0..CAUSTIC_LINES {
        let x = -half + (i as f32 + offset.x.fract()) * spacing;
        let z = -half + (i as f32 + offset.y.fract()) * spacing;

        let lines = [
            (vec3(x, y, -half), vec3(x, y, half)),
            (vec3(-half, y, z), vec3(half, y, z)),
        ];
        for (start, end) in lines {
            if let (Some(a), Some(b)) = (
                camera.world_to_screen(start, window_rect),
                camera.world_to_screen(end, window_rect),
            ) {
                draw.line().start(a).end(b).weight(2.0).color(color);
            }
        }
    }
}

fn draw_fish(draw: &Draw, camera: &OrbitCamera, fish: &Fish, light: f32, window_rect: Rect) {
    // Rebuild the facing from the yaw, the same way a mesh rotation would
    let yaw = fish.heading();
    let forward = vec3(yaw.cos(), 0.0, -yaw.sin());
    let side = vec3(-forward.z, 0.0, forward.x);

    let tail_root = fish.position - forward * FISH_BODY_RADIUS;
    let tail_end = tail_root - forward * FISH_TAIL_LENGTH;
    let tail = [
        tail_root,
        tail_end + side * FISH_TAIL_HALF_WIDTH,
        tail_end - side * FISH_TAIL_HALF_WIDTH,
    ];
    if let Some(points) = project_all(camera, &tail, window_rect) {
        draw.polygon().points(points).color(shade(FISH_TAIL_COLOR, light, 1.0));
    }

    if let Some(centre) = camera.world_to_screen(fish.position, window_rect) {
        let radius = projected_radius(camera, fish.position, FISH_BODY_RADIUS, window_rect);
        draw.ellipse().xy(centre).radius(radius).color(shade(FISH_BODY_COLOR, light, 1.0));
    }
}

fn draw_water_surface(draw: &Draw, camera: &OrbitCamera, floor: &Floor, height: f32, window_rect: Rect) {
    let h = floor.half_size();
    let corners = [
        vec3(-h, height, -h),
        vec3(h, height, -h),
        vec3(h, height, h),
        vec3(-h, height, h),
    ];
    if let Some(points) = project_all(camera, &corners, window_rect) {
        draw.polygon().points(points).color(rgba(0.25, 0.55, 0.85, 0.25));
    }
}

// Screen positions of every point, or None if any lies behind the camera
fn project_all(camera: &OrbitCamera, points: &[Vec3], window_rect: Rect) -> Option<Vec<Vec2>> {
    points.iter().map(|&p| camera.world_to_screen(p, window_rect)).collect()
}

// On-screen size of a sphere of `radius` at `centre`
fn projected_radius(camera: &OrbitCamera, centre: Vec3, radius: f32, window_rect: Rect) -> f32 {
    match (
        camera.world_to_screen(centre, window_rect),
        camera.world_to_screen(centre + Vec3::Y * radius, window_rect),
    ) {
        (Some(a), Some(b)) => a.distance(b).max(1.0),
        _ => 1.0,
    }
}

// Ambient plus a simple top-down diffuse term from the orbiting light
fn lighting(position: Vec3, light_position: Vec3) -> f32 {
    let to_light = (light_position - position).normalize_or_zero();
    AMBIENT_LIGHT + (1.0 - AMBIENT_LIGHT) * to_light.y.max(0.0)
}

fn shade(color: (u8, u8, u8), light: f32, alpha: f32) -> Rgba {
    let scale = |c: u8| (c as f32 / 255.0 * light).min(1.0);
    rgba(scale(color.0), scale(color.1), scale(color.2), alpha)
}
