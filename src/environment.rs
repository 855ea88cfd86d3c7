/*
 * Environment Module
 *
 * Decorative ambient motion: scrolling caustics, a gently bobbing water
 * surface and a light that circles the scene. Every value is a pure function
 * of the tick timestamp, so nothing here carries state between ticks.
 */

use nannou::prelude::*;

use crate::params::SimulationParams;

// Timestamp of a tick: its index and the elapsed seconds it represents
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    pub frame: u64,
    pub seconds: f32,
}

impl FrameTime {
    pub fn from_frame(frame: u64, frame_interval: f32) -> Self {
        Self {
            frame,
            seconds: frame as f32 * frame_interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentState {
    // Unwrapped texture offset; the renderer wraps it into [0, 1)
    pub caustics_offset: Vec2,
    pub water_height: f32,
    pub light_position: Vec3,
}

impl EnvironmentState {
    pub fn sample(time: FrameTime, params: &SimulationParams) -> Self {
        let [scroll_x, scroll_y] = params.caustics_scroll;
        let frames = time.frame as f32;
        let t = time.seconds;

        let light_angle = t * params.light_orbit_speed;

        Self {
            caustics_offset: vec2(frames * scroll_x, frames * scroll_y),
            water_height: params.water_baseline + (t * params.water_bob_speed).sin() * params.water_bob_amplitude,
            light_position: vec3(
                light_angle.sin() * params.light_orbit_radius,
                params.light_height,
                light_angle.cos() * params.light_orbit_radius,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn at_rest_on_the_first_frame() {
        let params = SimulationParams::default();
        let state = EnvironmentState::sample(FrameTime::default(), &params);

        assert_eq!(state.caustics_offset, Vec2::ZERO);
        assert_relative_eq!(state.water_height, params.water_baseline);
        assert_relative_eq!(state.light_position.z, params.light_orbit_radius);
    }

    #[test]
    fn caustics_scroll_monotonically() {
        let params = SimulationParams::default();
        let mut last = Vec2::ZERO;
        for frame in 1..500 {
            let state = EnvironmentState::sample(FrameTime::from_frame(frame, params.frame_interval), &params);
            assert!(state.caustics_offset.x > last.x);
            assert!(state.caustics_offset.y > last.y);
            last = state.caustics_offset;
        }
    }

    #[test]
    fn water_stays_within_amplitude() {
        let params = SimulationParams::default();
        for frame in (0..10_000).step_by(37) {
            let state = EnvironmentState::sample(FrameTime::from_frame(frame, params.frame_interval), &params);
            assert!((state.water_height - params.water_baseline).abs() <= params.water_bob_amplitude + 1e-6);
        }
    }

    #[test]
    fn light_keeps_its_orbit_radius() {
        let params = SimulationParams::default();
        let state = EnvironmentState::sample(FrameTime::from_frame(1234, params.frame_interval), &params);
        let flat = vec2(state.light_position.x, state.light_position.z);

        assert_relative_eq!(flat.length(), params.light_orbit_radius, epsilon = 1e-4);
        assert_eq!(state.light_position.y, params.light_height);
    }

    #[test]
    fn same_time_same_state() {
        let params = SimulationParams::default();
        let time = FrameTime::from_frame(77, params.frame_interval);
        assert_eq!(EnvironmentState::sample(time, &params), EnvironmentState::sample(time, &params));
    }
}
