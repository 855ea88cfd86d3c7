/*
 * Fish Module
 *
 * This module defines the Fish struct and its steering behaviour.
 * Each fish follows three rules every tick:
 * 1. Advance: Move along the current direction at the fish's own speed
 * 2. Wander: Occasionally pick a brand new horizontal heading
 * 3. Seek: Turn gradually towards the food target when one is placed
 *
 * The display heading (yaw) is always derived from the direction vector.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::SimulationParams;

// Per-fish steering data: a unit horizontal direction and a positive speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringState {
    pub direction: Vec3,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Fish {
    pub index: usize,
    pub position: Vec3,
    pub steering: SteeringState,
}

impl Fish {
    pub fn new(index: usize, position: Vec3, direction: Vec3, speed: f32) -> Self {
        Self {
            index,
            position,
            steering: SteeringState { direction, speed },
        }
    }

    // Place a fish at a random spot inside the spawn volume
    pub fn random<R: Rng + ?Sized>(index: usize, params: &SimulationParams, rng: &mut R) -> Self {
        let half = params.fish_spawn_half_extent;
        let position = vec3(
            rng.gen_range(-half..=half),
            rng.gen_range(0.0..=params.fish_spawn_max_height),
            rng.gen_range(-half..=half),
        );
        let speed = rng.gen_range(params.min_fish_speed..=params.max_fish_speed);

        Self::new(index, position, random_horizontal_direction(rng), speed)
    }

    // Yaw used to orient the fish model
    pub fn heading(&self) -> f32 {
        let d = self.steering.direction;
        (-d.z).atan2(d.x)
    }

    // Explicit Euler step, one tick at a time (no delta time)
    pub fn advance(&mut self) {
        self.position += self.steering.direction * self.steering.speed;
    }

    // With a small chance, replace the direction with a random horizontal one
    pub fn wander<R: Rng + ?Sized>(&mut self, probability: f32, rng: &mut R) {
        if rng.gen::<f32>() < probability {
            self.steering.direction = random_horizontal_direction(rng);
        }
    }

    // Blend the current direction towards the food bearing
    pub fn steer_toward_food(&mut self, food: Vec3, factor: f32) {
        // Flattened after normalizing and not renormalized: collapses to zero
        // when the food is straight above or below the fish.
        let mut to_food = (food - self.position).normalize_or_zero();
        to_food.y = 0.0;

        self.steering.direction = steer_toward(self.steering.direction, to_food, factor);
    }

    // Run the full per-tick update for this fish
    pub fn update<R: Rng + ?Sized>(&mut self, food: Option<Vec3>, params: &SimulationParams, rng: &mut R) {
        self.advance();
        self.wander(params.wander_probability, rng);

        if let Some(food) = food {
            self.steer_toward_food(food, params.steer_factor);
        }
    }
}

// Linear blend towards a target bearing, then back onto the unit circle
pub fn steer_toward(direction: Vec3, target: Vec3, factor: f32) -> Vec3 {
    direction.lerp(target, factor).normalize()
}

// Uniformly distributed unit vector in the horizontal (XZ) plane
pub fn random_horizontal_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    vec3(angle.cos(), 0.0, angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn still_water() -> SimulationParams {
        SimulationParams {
            wander_probability: 0.0,
            ..SimulationParams::default()
        }
    }

    fn angle_between(a: Vec3, b: Vec3) -> f32 {
        a.cross(b).length().atan2(a.dot(b))
    }

    #[test]
    fn heading_follows_direction() {
        let mut fish = Fish::new(0, Vec3::ZERO, vec3(1.0, 0.0, 0.0), 0.01);
        assert_abs_diff_eq!(fish.heading(), 0.0);

        fish.steering.direction = vec3(0.0, 0.0, -1.0);
        assert_relative_eq!(fish.heading(), PI / 2.0);

        fish.steering.direction = vec3(0.0, 0.0, 1.0);
        assert_relative_eq!(fish.heading(), -PI / 2.0);
    }

    #[test]
    fn straight_swim_without_food() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let params = still_water();
        let mut fish = Fish::new(0, Vec3::ZERO, vec3(1.0, 0.0, 0.0), 0.01);

        for _ in 0..100 {
            fish.update(None, &params, &mut rng);
        }

        assert_relative_eq!(fish.position.x, 1.0, epsilon = 1e-4);
        assert_eq!(fish.steering.direction, vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn random_directions_are_unit_and_flat() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = random_horizontal_direction(&mut rng);
            assert_eq!(d.y, 0.0);
            assert_relative_eq!(d.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn wander_always_fires_at_probability_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut fish = Fish::new(0, Vec3::ZERO, vec3(1.0, 0.0, 0.0), 0.01);
        fish.wander(1.0, &mut rng);
        assert_ne!(fish.steering.direction, vec3(1.0, 0.0, 0.0));
        assert_eq!(fish.steering.direction.y, 0.0);
    }

    #[test]
    fn steering_turns_gradually_towards_food() {
        let mut fish = Fish::new(0, Vec3::ZERO, vec3(0.0, 0.0, 1.0), 0.01);
        fish.steer_toward_food(vec3(5.0, 0.0, 0.0), 0.02);

        let d = fish.steering.direction;
        assert!(d.x > 0.0);
        assert!(d.x < 0.05);
        assert_relative_eq!(d.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn food_straight_above_stalls_steering() {
        let start = vec3(0.6, 0.0, 0.8);
        let mut fish = Fish::new(0, vec3(1.0, 0.0, 1.0), start, 0.01);
        fish.steer_toward_food(vec3(1.0, 4.0, 1.0), 0.02);

        assert_relative_eq!(fish.steering.direction.x, start.x, epsilon = 1e-6);
        assert_relative_eq!(fish.steering.direction.z, start.z, epsilon = 1e-6);
        assert_eq!(fish.steering.direction.y, 0.0);
    }

    #[test]
    fn food_at_fish_position_keeps_direction_finite() {
        let mut fish = Fish::new(0, vec3(2.0, 0.5, 2.0), vec3(1.0, 0.0, 0.0), 0.01);
        fish.steer_toward_food(vec3(2.0, 0.5, 2.0), 0.02);
        assert!(fish.steering.direction.is_finite());
        assert_relative_eq!(fish.steering.direction.x, 1.0);
    }

    #[test]
    fn elevated_food_bearing_is_not_renormalized() {
        // Food up and ahead: the flattened bearing is shorter than one, so the
        // turn is weaker than for level food at the same compass bearing.
        let mut level = Fish::new(0, Vec3::ZERO, vec3(0.0, 0.0, 1.0), 0.01);
        let mut raised = level.clone();
        level.steer_toward_food(vec3(3.0, 0.0, 0.0), 0.02);
        raised.steer_toward_food(vec3(3.0, 3.0, 0.0), 0.02);

        assert!(raised.steering.direction.x < level.steering.direction.x);
        assert!(raised.steering.direction.x > 0.0);
    }

    #[test]
    fn repeated_steering_closes_angle_monotonically() {
        let target = vec3(1.0, 0.0, 0.0);
        let mut direction = vec3(0.0, 0.0, 1.0);
        let mut previous = angle_between(direction, target);

        for _ in 0..100 {
            direction = steer_toward(direction, target, 0.02);
            let angle = angle_between(direction, target);
            assert!(angle < previous);
            previous = angle;
        }
        assert!(previous > 0.0);
    }

    #[test]
    fn random_fish_lands_inside_spawn_volume() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let params = SimulationParams::default();
        for i in 0..50 {
            let fish = Fish::random(i, &params, &mut rng);
            assert!(fish.position.x.abs() <= params.fish_spawn_half_extent);
            assert!(fish.position.z.abs() <= params.fish_spawn_half_extent);
            assert!((0.0..=params.fish_spawn_max_height).contains(&fish.position.y));
            assert!(fish.steering.speed >= params.min_fish_speed);
            assert!(fish.steering.speed <= params.max_fish_speed);
        }
    }
}
