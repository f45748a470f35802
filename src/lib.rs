pub mod actions;
pub mod command;
pub mod engine;
pub mod report;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod stress;
pub mod systems;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, SessionOutcome, SessionSummary};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::World;
