/*
 * Camera Module
 *
 * This module defines the OrbitCamera struct that looks at a target point
 * from a yaw/pitch/distance orbit. It provides the transformations between
 * world space, normalized device coordinates and screen space, and builds
 * pointer rays for picking.
 */

use nannou::prelude::*;

use crate::params::SimulationParams;

// A half-line in world space; direction is unit length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl OrbitCamera {
    // Build a camera at `eye` looking at the world origin
    pub fn new(eye: Vec3, params: &SimulationParams) -> Self {
        let distance = eye.length();
        let horizontal = (eye.x * eye.x + eye.z * eye.z).sqrt();

        Self {
            target: Vec3::ZERO,
            yaw: eye.x.atan2(eye.z),
            pitch: eye.y.atan2(horizontal),
            distance,
            fov_y: params.fov_degrees.to_radians(),
            aspect: 1.0,
            near: params.near_plane,
            far: params.far_plane,
            min_distance: 1.0,
            max_distance: 30.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    pub fn from_params(params: &SimulationParams) -> Self {
        let [x, y, z] = params.camera_position;
        Self::new(vec3(x, y, z), params)
    }

    // World position of the camera
    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target + vec3(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    // Keep the projection in step with the window shape
    pub fn set_viewport(&mut self, window_rect: Rect) {
        if window_rect.h() > 0.0 {
            self.aspect = window_rect.w() / window_rect.h();
        }
    }

    // Ray from the eye through a point given in normalized device coordinates
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let origin = self.eye();
        let through = inverse.project_point3(vec3(ndc.x, ndc.y, 0.5));

        Ray {
            origin,
            direction: (through - origin).normalize(),
        }
    }

    // Project a world point to normalized device coordinates; None when behind the eye
    pub fn world_to_ndc(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    // Project a world point to nannou screen space (origin at the window centre)
    pub fn world_to_screen(&self, point: Vec3, window_rect: Rect) -> Option<Vec2> {
        self.world_to_ndc(point)
            .map(|ndc| vec2(ndc.x * window_rect.w() / 2.0, ndc.y * window_rect.h() / 2.0) + window_rect.xy())
    }

    // Convert a screen position to normalized device coordinates
    pub fn screen_to_ndc(point: Vec2, window_rect: Rect) -> Vec2 {
        let centered = point - window_rect.xy();
        vec2(centered.x / (window_rect.w() / 2.0), centered.y / (window_rect.h() / 2.0))
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: f32) {
        let zoom_factor = 1.0 - scroll_delta * 0.1;
        self.distance = (self.distance * zoom_factor).clamp(self.min_distance, self.max_distance);
    }

    // Start orbiting the camera
    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Update the orbit while dragging
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;

            if delta.length_squared() > 0.0 {
                self.yaw -= delta.x * 0.005;
                // Stay above the floor and short of the pole
                self.pitch = (self.pitch - delta.y * 0.005).clamp(0.05, 1.5);
                self.last_cursor_pos = position;
            }
        }
    }

    // End orbiting
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_camera() -> OrbitCamera {
        let mut camera = OrbitCamera::from_params(&SimulationParams::default());
        camera.aspect = 16.0 / 9.0;
        camera
    }

    #[test]
    fn eye_matches_configured_position() {
        let eye = default_camera().eye();
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn centre_ray_points_at_target() {
        let camera = default_camera();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        let expected = (camera.target - camera.eye()).normalize();
        assert_relative_eq!(ray.direction.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(ray.direction.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(ray.direction.z, expected.z, epsilon = 1e-4);
    }

    #[test]
    fn ray_and_projection_agree() {
        let camera = default_camera();
        let ndc = vec2(0.3, -0.4);
        let ray = camera.ray_from_ndc(ndc);
        let projected = camera.world_to_ndc(ray.at(4.0)).unwrap();
        assert_relative_eq!(projected.x, ndc.x, epsilon = 1e-3);
        assert_relative_eq!(projected.y, ndc.y, epsilon = 1e-3);
    }

    #[test]
    fn points_behind_the_eye_do_not_project() {
        let camera = default_camera();
        assert!(camera.world_to_ndc(vec3(0.0, 2.0, 20.0)).is_none());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = default_camera();
        for _ in 0..100 {
            camera.zoom(5.0);
        }
        assert_eq!(camera.distance, camera.min_distance);
    }

    #[test]
    fn drag_orbits_without_moving_target() {
        let mut camera = default_camera();
        let before = camera.eye();
        camera.start_drag(Vec2::ZERO);
        camera.drag(vec2(100.0, 0.0));
        camera.end_drag();

        assert_ne!(camera.eye(), before);
        assert_eq!(camera.target, Vec3::ZERO);
        assert_relative_eq!(camera.eye().length(), before.length(), epsilon = 1e-4);
    }
}
