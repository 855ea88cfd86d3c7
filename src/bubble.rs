/*
 * Bubble Module
 *
 * Short-lived particles that rise from the floor and fade out.
 * Every tick at most one bubble is spawned, then every live bubble rises,
 * fades, and is dropped the moment it becomes fully transparent.
 * The population has no cap; spawn chance and lifetime keep it small.
 */

use nannou::prelude::*;
use rand::Rng;
use tracing::trace;

use crate::params::SimulationParams;

// Opacity at or below this counts as fully faded (absorbs f32 drift from
// repeated subtraction)
pub const OPACITY_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub position: Vec3,
    pub opacity: f32,
}

impl Bubble {
    pub fn new(position: Vec3, opacity: f32) -> Self {
        Self { position, opacity }
    }

    // Rise and fade by one tick; returns false once the bubble has faded out.
    // Opacity within OPACITY_EPSILON of zero already counts as faded, so a
    // bubble whose rates divide its opacity evenly pops on the expected tick
    // instead of one later from rounding.
    pub fn update(&mut self, rise_rate: f32, fade_rate: f32) -> bool {
        self.position.y += rise_rate;
        self.opacity -= fade_rate;
        self.opacity > OPACITY_EPSILON
    }
}

#[derive(Debug, Clone, Default)]
pub struct BubbleSystem {
    bubbles: Vec<Bubble>,
    total_spawned: u64,
    total_popped: u64,
}

impl BubbleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    pub fn total_popped(&self) -> u64 {
        self.total_popped
    }

    pub fn push(&mut self, bubble: Bubble) {
        self.total_spawned += 1;
        self.bubbles.push(bubble);
    }

    // Roll the spawn chance and add one bubble near the floor on success
    pub fn maybe_spawn<R: Rng + ?Sized>(&mut self, params: &SimulationParams, rng: &mut R) -> bool {
        if rng.gen::<f32>() >= params.bubble_spawn_probability {
            return false;
        }

        let half = params.bubble_spawn_half_extent;
        let position = vec3(
            rng.gen_range(-half..half),
            params.bubble_spawn_height,
            rng.gen_range(-half..half),
        );
        trace!(x = position.x, z = position.z, "bubble spawned");
        self.push(Bubble::new(position, params.bubble_initial_opacity));
        true
    }

    // Advance every bubble and drop the faded ones; returns how many were dropped
    pub fn update(&mut self, params: &SimulationParams) -> usize {
        let mut popped = 0;

        // Walk backwards so removal never skips an unvisited bubble
        for i in (0..self.bubbles.len()).rev() {
            let alive = self.bubbles[i].update(params.bubble_rise_rate, params.bubble_fade_rate);
            if !alive {
                let bubble = self.bubbles.remove(i);
                trace!(height = bubble.position.y, "bubble popped");
                popped += 1;
            }
        }

        self.total_popped += popped as u64;
        popped
    }

    // The full per-tick pass: spawn first, then update everything
    pub fn step<R: Rng + ?Sized>(&mut self, params: &SimulationParams, rng: &mut R) {
        self.maybe_spawn(params, rng);
        self.update(params);
    }
}
