//! Descent trajectory synthesis: speed schedules, point sampling, profile integration with
//! deceleration segments, trip ETAs and the RTA schedule search.

pub mod deceleration;
pub mod profile;
pub mod sampler;
pub mod schedule;
pub mod search;
pub mod trip;

pub use error::{BracketSide, ConfigurationError, TrajectoryError};
pub use facade::*;

mod error;
mod facade;
