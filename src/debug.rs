/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation counters to be displayed in the UI.
 */

use std::time::Duration;

use nannou::prelude::*;

use crate::simulation::Simulation;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub live_bubbles: usize,
    pub bubbles_spawned: u64,
    pub food: Option<Vec3>,
}

impl DebugInfo {
    // Copy the counters out of the simulation after a tick
    pub fn record(&mut self, sim: &Simulation, ticks: u64) {
        self.ticks = ticks;
        self.live_bubbles = sim.bubbles().len();
        self.bubbles_spawned = sim.bubbles().total_spawned();
        self.food = sim.food().point();
    }

    // Text lines for the overlay and the UI panel
    pub fn lines(&self) -> Vec<String> {
        let food = match self.food {
            Some(p) => format!("Food: ({:.2}, {:.2})", p.x, p.z),
            None => "Food: none".to_string(),
        };

        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks: {}", self.ticks),
            format!("Bubbles: {} live / {} spawned", self.live_bubbles, self.bubbles_spawned),
            food,
        ]
    }
}
