/*
 * Frame Driver Module
 *
 * Runs the simulation one tick at a time and tells the renderer when a
 * frame is ready. The host decides when ticks happen through a TickSource:
 * the display refresh in the windowed app, or a fixed count when running
 * headless and in tests. A StopHandle ends the loop at the next tick.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::simulation::Simulation;

// Host-owned scheduling primitive; returns false when no more ticks will come
pub trait TickSource {
    fn next_tick(&mut self) -> bool;
}

// Receives the "ready to render" signal after every tick
pub trait RenderSink {
    fn frame_ready(&mut self, sim: &Simulation);
}

impl<F: FnMut(&Simulation)> RenderSink for F {
    fn frame_ready(&mut self, sim: &Simulation) {
        self(sim)
    }
}

// Yields exactly `n` ticks
#[derive(Debug, Clone, Copy)]
pub struct FixedTicks {
    remaining: u64,
}

impl FixedTicks {
    pub fn new(count: u64) -> Self {
        Self { remaining: count }
    }
}

impl TickSource for FixedTicks {
    fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

// Cloneable flag that asks the driver to stop before its next tick
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Default)]
pub struct FrameDriver {
    stop: StopHandle,
    ticks: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    // Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Run a single tick unless stopped; returns whether a tick ran
    pub fn step<S: RenderSink + ?Sized>(&mut self, sim: &mut Simulation, sink: &mut S) -> bool {
        if self.stop.is_stopped() {
            return false;
        }

        sim.tick();
        self.ticks += 1;
        sink.frame_ready(sim);
        true
    }

    // Keep ticking until the source runs dry or a stop is requested
    pub fn run<T, S>(&mut self, source: &mut T, sim: &mut Simulation, sink: &mut S) -> u64
    where
        T: TickSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        let start = self.ticks;
        info!("frame driver started");

        while source.next_tick() {
            if !self.step(sim, sink) {
                debug!(tick = self.ticks, "stop requested");
                break;
            }
        }

        let ran = self.ticks - start;
        info!(ticks = ran, "frame driver finished");
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;

    #[test]
    fn fixed_ticks_runs_exactly_n() {
        let mut sim = Simulation::new(SimulationParams::default(), 1);
        let mut driver = FrameDriver::new();
        let mut rendered = 0;

        let ran = driver.run(&mut FixedTicks::new(25), &mut sim, &mut |_: &Simulation| rendered += 1);

        assert_eq!(ran, 25);
        assert_eq!(rendered, 25);
        assert_eq!(sim.frame(), 25);
    }

    #[test]
    fn render_sees_the_finished_tick() {
        let mut sim = Simulation::new(SimulationParams::default(), 2);
        let mut driver = FrameDriver::new();
        let mut frames = Vec::new();

        driver.run(&mut FixedTicks::new(3), &mut sim, &mut |s: &Simulation| frames.push(s.frame()));

        assert_eq!(frames, vec![1, 2, 3]);
    }

    #[test]
    fn stop_handle_halts_before_next_tick() {
        let mut sim = Simulation::new(SimulationParams::default(), 3);
        let mut driver = FrameDriver::new();
        let stop = driver.stop_handle();

        let ran = driver.run(&mut FixedTicks::new(100), &mut sim, &mut |s: &Simulation| {
            if s.frame() == 10 {
                stop.stop();
            }
        });

        assert_eq!(ran, 10);
        assert_eq!(sim.frame(), 10);
        assert!(!driver.step(&mut sim, &mut |_: &Simulation| {}));
    }
}
