//! Aircraft performance oracle: the boundary the trajectory engine samples through, plus a
//! parametric implementation driven by the aircraft catalog.

mod error;
mod oracle;
mod parametric;

pub use descent_core::atmosphere::AtmosphereState;
pub use error::PerformanceError;
pub use oracle::{AeroConfiguration, FlightEvolution, FlightPhase, GearState, PerformanceOracle};
pub use parametric::ParametricAircraft;
