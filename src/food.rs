/*
 * Food Module
 *
 * This module holds the single food target that fish swim towards.
 * The target is placed by casting a pointer ray onto the floor; the latest
 * hit always wins and a target never expires on its own.
 */

use nannou::prelude::*;
use tracing::debug;

use crate::camera::OrbitCamera;
use crate::scene::Floor;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodTarget {
    point: Option<Vec3>,
}

impl FoodTarget {
    pub fn new() -> Self {
        Self::default()
    }

    // The point fish steer towards, if food has been placed
    pub fn point(&self) -> Option<Vec3> {
        self.point
    }

    pub fn is_set(&self) -> bool {
        self.point.is_some()
    }

    // Replace any previous target
    pub fn set(&mut self, point: Vec3) {
        self.point = Some(point);
    }

    // Where to draw the food pellet: lifted slightly above the floor
    pub fn marker_position(&self, offset: f32) -> Option<Vec3> {
        self.point.map(|p| p + vec3(0.0, offset, 0.0))
    }

    // Cast a pointer ray onto the floor and move the target to the hit point.
    // Returns the new target, or None when the ray misses and nothing changed.
    pub fn place_from_ndc(&mut self, ndc: Vec2, camera: &OrbitCamera, floor: &Floor) -> Option<Vec3> {
        let ray = camera.ray_from_ndc(ndc);

        match floor.intersect(&ray) {
            Some(hit) => {
                debug!(x = hit.x, z = hit.z, "food placed");
                self.set(hit);
                Some(hit)
            }
            None => {
                debug!(ndc_x = ndc.x, ndc_y = ndc.y, "pointer missed the floor");
                None
            }
        }
    }
}
