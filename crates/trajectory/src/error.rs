use std::fmt;

use descent_performance::PerformanceError;
use serde::Serialize;
use thiserror::Error;

/// Inputs that can never produce a valid trajectory. Not retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("target FL{target_fl} is above cruise FL{cruise_fl}")]
    TargetAboveCruise { cruise_fl: i32, target_fl: i32 },
    #[error("intermediate CAS {intermediate_kt} kt exceeds high CAS {high_kt} kt")]
    IntermediateAboveHighCas { intermediate_kt: f64, high_kt: f64 },
    #[error("descent distance {descent_nm:.1} nm exceeds route length {route_nm:.1} nm")]
    NegativeCruiseDistance { route_nm: f64, descent_nm: f64 },
    #[error("{quantity} must be positive (got {value})")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("RTA tolerance must be non-negative (got {0} s)")]
    NegativeTolerance(f64),
}

/// Which canonical schedule of the ETA bracket failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BracketSide {
    Fastest,
    Slowest,
}

impl fmt::Display for BracketSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketSide::Fastest => write!(f, "fastest"),
            BracketSide::Slowest => write!(f, "slowest"),
        }
    }
}

/// Top-level trajectory error.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("performance model failed: {0}")]
    Oracle(#[from] PerformanceError),
    #[error("ETA bracket unavailable: {side} schedule failed: {source}")]
    BracketUnavailable {
        side: BracketSide,
        source: PerformanceError,
    },
}
