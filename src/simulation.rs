/*
 * Simulation Module
 *
 * This module owns every piece of mutable aquarium state and runs the
 * per-tick update in a fixed order:
 * 1. Fish: advance, wander, seek food, derive heading
 * 2. Environment: resample the ambient animation for this tick
 * 3. Bubbles: maybe spawn one, then rise, fade and cull
 *
 * Randomness comes from a seeded generator so that runs can be replayed.
 */

use nannou::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::bubble::BubbleSystem;
use crate::camera::OrbitCamera;
use crate::environment::{EnvironmentState, FrameTime};
use crate::fish::Fish;
use crate::food::FoodTarget;
use crate::params::SimulationParams;
use crate::scene::SceneLayout;

pub struct Simulation {
    pub params: SimulationParams,
    pub camera: OrbitCamera,
    fish: Vec<Fish>,
    bubbles: BubbleSystem,
    food: FoodTarget,
    scene: SceneLayout,
    environment: EnvironmentState,
    frame: u64,
    rng: ChaCha8Rng,
}

impl Simulation {
    // Create a simulation with randomly placed fish and corals
    pub fn new(params: SimulationParams, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scene = SceneLayout::generate(&params, &mut rng);
        let fish = (0..params.num_fish).map(|i| Fish::random(i, &params, &mut rng)).collect();

        info!(seed, fish = params.num_fish, corals = scene.corals.len(), "simulation created");
        Self::assemble(params, fish, scene, rng)
    }

    // Create a simulation with a caller-chosen school of fish
    pub fn with_fish(params: SimulationParams, fish: Vec<Fish>, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scene = SceneLayout::generate(&params, &mut rng);
        Self::assemble(params, fish, scene, rng)
    }

    fn assemble(params: SimulationParams, fish: Vec<Fish>, scene: SceneLayout, rng: ChaCha8Rng) -> Self {
        let camera = OrbitCamera::from_params(&params);
        let environment = EnvironmentState::sample(FrameTime::default(), &params);

        Self {
            params,
            camera,
            fish,
            bubbles: BubbleSystem::new(),
            food: FoodTarget::new(),
            scene,
            environment,
            frame: 0,
            rng,
        }
    }

    // Advance the whole aquarium by one tick
    pub fn tick(&mut self) {
        let food = self.food.point();
        for fish in &mut self.fish {
            fish.update(food, &self.params, &mut self.rng);
        }

        self.environment = EnvironmentState::sample(self.time(), &self.params);

        self.bubbles.step(&self.params, &mut self.rng);

        self.frame += 1;
    }

    // Point the food target at whatever floor spot lies under the pointer
    pub fn set_food_from_ndc(&mut self, ndc: Vec2) {
        self.food.place_from_ndc(ndc, &self.camera, &self.scene.floor);
    }

    // Timestamp of the tick that runs next
    pub fn time(&self) -> FrameTime {
        FrameTime::from_frame(self.frame, self.params.frame_interval)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn bubbles(&self) -> &BubbleSystem {
        &self.bubbles
    }

    pub fn food(&self) -> &FoodTarget {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut FoodTarget {
        &mut self.food
    }

    pub fn scene(&self) -> &SceneLayout {
        &self.scene
    }

    pub fn environment(&self) -> &EnvironmentState {
        &self.environment
    }
}
