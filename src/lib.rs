pub mod body;
pub mod c_api;
pub mod collision;
pub mod config;
pub mod constraint;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod utils;

pub use body::Body;
pub use collision::{resolve_pair_collision, solve_normal_collision};
pub use config::SimulationConfig;
pub use constraint::RoundConstraint;
pub use error::{Result, SimError};
pub use forces::ExternalForce;
pub use integrator::integrate;
pub use simulation::Simulation;
pub use ultraviolet;
