pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, Color, System, Trail, NVec2, TRAIL_CAPACITY};
pub use simulation::error::SimError;
pub use simulation::params::{Parameters, GRAVITATIONAL_CONSTANT, MIN_SEPARATION_SQUARED};
pub use simulation::forces::{Force, ForceSet, NewtonianGravity};
pub use simulation::integrator::symplectic_euler;
pub use simulation::orbit::{assign_circular_velocity, circular_velocity};
pub use simulation::engine::Engine;
pub use simulation::diagnostics::{kinetic_energy, potential_energy, total_energy, total_momentum};
pub use simulation::scenario::Scenario;

pub use configuration::config::{UpdateOrder, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use visualization::display::{DisplayConfig, TrailSegment, trail_segments};

pub use benchmark::benchmark::{bench_gravity, bench_step, spiral_system};
