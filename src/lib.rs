/*
 * Aquarium Simulation - Module Definitions
 *
 * This file defines the module structure for the aquarium application.
 * The simulation core (fish, food, bubbles, environment, driver) has no
 * dependency on a live window; the app, input, renderer and ui modules
 * form the nannou front-end on top of it.
 */

// Re-export key components for easier access
pub use app::Model;
pub use bubble::{Bubble, BubbleSystem};
pub use camera::{OrbitCamera, Ray};
pub use debug::DebugInfo;
pub use driver::{FixedTicks, FrameDriver, RenderSink, StopHandle, TickSource};
pub use environment::{EnvironmentState, FrameTime};
pub use fish::{Fish, SteeringState};
pub use food::FoodTarget;
pub use params::{ConfigError, SimulationParams};
pub use scene::{Coral, Floor, SceneLayout};
pub use simulation::Simulation;

// Define modules
pub mod app;
pub mod bubble;
pub mod camera;
pub mod debug;
pub mod driver;
pub mod environment;
pub mod fish;
pub mod food;
pub mod input;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod simulation;
pub mod ui;
