use descent_config::ConfigError;
use thiserror::Error;

/// Domain errors raised by a performance model for inputs outside its envelope.
#[derive(Debug, Error)]
pub enum PerformanceError {
    #[error("altitude {altitude_m:.0} m outside model envelope [{min_m:.0}, {max_m:.0}] m")]
    AltitudeOutOfRange {
        altitude_m: f64,
        min_m: f64,
        max_m: f64,
    },
    #[error("mass {mass_kg:.0} kg outside aircraft envelope [{min_kg:.0}, {max_kg:.0}] kg")]
    MassOutOfRange {
        mass_kg: f64,
        min_kg: f64,
        max_kg: f64,
    },
    #[error("{quantity} must be positive (got {value})")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("no drag polar for high-lift setting {0}")]
    UnknownHighLift(u8),
    #[error("aircraft '{0}' not found in catalog")]
    UnknownAircraft(String),
    #[error("aircraft configuration rejected: {0}")]
    Config(#[from] ConfigError),
}
