/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants of the aquarium: fish behaviour, bubble lifecycle,
 * ambient animation, floor and camera setup. Values can be loaded from a
 * TOML file and adjusted live through the UI.
 */

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Errors raised while loading or validating a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// Parameters for the simulation that can be adjusted via config file or UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // Fish
    pub num_fish: usize,
    pub min_fish_speed: f32,
    pub max_fish_speed: f32,
    pub fish_spawn_half_extent: f32,
    pub fish_spawn_max_height: f32,
    pub wander_probability: f32,
    pub steer_factor: f32,

    // Bubbles
    pub bubble_spawn_probability: f32,
    pub bubble_spawn_half_extent: f32,
    pub bubble_spawn_height: f32,
    pub bubble_rise_rate: f32,
    pub bubble_initial_opacity: f32,
    pub bubble_fade_rate: f32,

    // Ambient animation
    pub caustics_scroll: [f32; 2],
    pub water_baseline: f32,
    pub water_bob_amplitude: f32,
    pub water_bob_speed: f32,
    pub light_orbit_radius: f32,
    pub light_orbit_speed: f32,
    pub light_height: f32,

    // Static scene
    pub floor_size: f32,
    pub floor_height: f32,
    pub num_corals: usize,
    pub food_marker_offset: f32,

    // Camera
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub camera_position: [f32; 3],

    // Timing: seconds represented by one tick when deriving ambient motion
    pub frame_interval: f32,

    // Host toggles
    pub show_debug: bool,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_fish: 5,
            min_fish_speed: 0.01,
            max_fish_speed: 0.03,
            fish_spawn_half_extent: 5.0,
            fish_spawn_max_height: 2.0,
            wander_probability: 0.005,
            steer_factor: 0.02,

            bubble_spawn_probability: 0.05,
            bubble_spawn_half_extent: 5.0,
            bubble_spawn_height: -1.0,
            bubble_rise_rate: 0.01,
            bubble_initial_opacity: 0.6,
            bubble_fade_rate: 0.002,

            caustics_scroll: [0.0005, 0.0003],
            water_baseline: 3.0,
            water_bob_amplitude: 0.05,
            water_bob_speed: 0.5,
            light_orbit_radius: 5.0,
            light_orbit_speed: 0.1,
            light_height: 10.0,

            floor_size: 20.0,
            floor_height: -1.0,
            num_corals: 20,
            food_marker_offset: 0.1,

            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            camera_position: [0.0, 2.0, 5.0],

            frame_interval: 1.0 / 60.0,

            show_debug: false,
            pause_simulation: false,
        }
    }
}

impl SimulationParams {
    // Parse parameters from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    // Load parameters from a TOML file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    // Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_fish == 0 {
            return Err(invalid("num_fish", "at least one fish is required"));
        }
        check_probability("wander_probability", self.wander_probability)?;
        check_probability("steer_factor", self.steer_factor)?;
        check_probability("bubble_spawn_probability", self.bubble_spawn_probability)?;
        check_probability("bubble_initial_opacity", self.bubble_initial_opacity)?;
        check_positive("min_fish_speed", self.min_fish_speed)?;
        check_non_negative("fish_spawn_half_extent", self.fish_spawn_half_extent)?;
        check_non_negative("fish_spawn_max_height", self.fish_spawn_max_height)?;
        check_positive("bubble_spawn_half_extent", self.bubble_spawn_half_extent)?;
        check_positive("bubble_rise_rate", self.bubble_rise_rate)?;
        check_positive("bubble_fade_rate", self.bubble_fade_rate)?;
        check_positive("floor_size", self.floor_size)?;
        check_positive("frame_interval", self.frame_interval)?;
        if self.max_fish_speed < self.min_fish_speed {
            return Err(invalid("max_fish_speed", "must not be below min_fish_speed"));
        }
        if self.near_plane <= 0.0 || self.far_plane <= self.near_plane {
            return Err(invalid("far_plane", "clip planes must satisfy 0 < near < far"));
        }
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn probability_range() -> RangeInclusive<f32> {
        0.0..=0.2
    }

    pub fn steer_factor_range() -> RangeInclusive<f32> {
        0.0..=0.2
    }

    pub fn rise_rate_range() -> RangeInclusive<f32> {
        0.001..=0.05
    }

    pub fn fade_rate_range() -> RangeInclusive<f32> {
        0.0005..=0.01
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is outside [0, 1]")))
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must not be negative")))
    }
}
