/*
 * Scene Module
 *
 * Static parts of the aquarium: the sandy floor that food lands on and the
 * corals scattered over it. These never move once placed.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::camera::Ray;
use crate::params::SimulationParams;

// Colour palette shared by the renderer
pub const OCEAN_BLUE: (u8, u8, u8) = (0x1e, 0x3f, 0x66);
pub const FLOOR_COLOR: (u8, u8, u8) = (0x22, 0x44, 0x66);
pub const CORAL_COLOR: (u8, u8, u8) = (0xff, 0x69, 0xb4);
pub const FISH_BODY_COLOR: (u8, u8, u8) = (0xff, 0xcc, 0x00);
pub const FISH_TAIL_COLOR: (u8, u8, u8) = (0xff, 0x88, 0x00);

const CORAL_HEIGHT: f32 = -0.7;
const CORAL_SPREAD: f32 = 16.0;

// Horizontal square plane centred on the world origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    pub size: f32,
    pub height: f32,
}

impl Floor {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            size: params.floor_size,
            height: params.floor_height,
        }
    }

    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    // Nearest intersection in front of the ray origin, within the floor extent
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        if ray.direction.y.abs() <= f32::EPSILON {
            return None;
        }

        let t = (self.height - ray.origin.y) / ray.direction.y;
        if t <= 0.0 {
            return None;
        }

        let hit = ray.at(t);
        let half = self.half_size();
        if hit.x.abs() > half || hit.z.abs() > half {
            return None;
        }

        Some(vec3(hit.x, self.height, hit.z))
    }

    // Corner points in drawing order
    pub fn corners(&self) -> [Vec3; 4] {
        let h = self.half_size();
        [
            vec3(-h, self.height, -h),
            vec3(h, self.height, -h),
            vec3(h, self.height, h),
            vec3(-h, self.height, h),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coral {
    pub position: Vec3,
    pub radius: f32,
    pub rotation: f32,
}

impl Coral {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = (rng.gen::<f32>() - 0.5) * CORAL_SPREAD;
        let z = (rng.gen::<f32>() - 0.5) * CORAL_SPREAD;

        Self {
            position: vec3(x, CORAL_HEIGHT, z),
            radius: 0.3 + rng.gen::<f32>() * 0.3,
            rotation: rng.gen::<f32>() * TAU,
        }
    }
}

// Everything that stays put for the whole run
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub floor: Floor,
    pub corals: Vec<Coral>,
}

impl SceneLayout {
    pub fn generate<R: Rng + ?Sized>(params: &SimulationParams, rng: &mut R) -> Self {
        Self {
            floor: Floor::from_params(params),
            corals: (0..params.num_corals).map(|_| Coral::random(rng)).collect(),
        }
    }
}
