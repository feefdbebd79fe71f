//! Speed schedules and the per-level speed resolver.

use std::fmt;

use descent_core::units::{ft_to_fl, kt_to_ms, m_to_ft};
use descent_performance::{FlightEvolution, PerformanceError, PerformanceOracle};
use serde::Serialize;

use crate::ConfigurationError;

/// Lower CAS held from a trigger flight level downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntermediateStep {
    pub cas_kt: f64,
    pub flight_level: i32,
}

/// Descent speed schedule: Mach above the crossover, then high CAS, then an optional lower CAS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedSchedule {
    pub descent_mach: f64,
    pub high_cas_kt: f64,
    pub intermediate: Option<IntermediateStep>,
}

impl SpeedSchedule {
    /// Fast canonical schedule bounding the ETA window from below.
    pub const FASTEST: SpeedSchedule = SpeedSchedule {
        descent_mach: 0.80,
        high_cas_kt: 310.0,
        intermediate: None,
    };

    /// Slow canonical schedule bounding the ETA window from above.
    pub const SLOWEST: SpeedSchedule = SpeedSchedule {
        descent_mach: 0.73,
        high_cas_kt: 245.0,
        intermediate: Some(IntermediateStep {
            cas_kt: 220.0,
            flight_level: 150,
        }),
    };

    pub fn new(descent_mach: f64, high_cas_kt: f64) -> Self {
        Self {
            descent_mach,
            high_cas_kt,
            intermediate: None,
        }
    }

    pub fn with_intermediate(mut self, cas_kt: f64, flight_level: i32) -> Self {
        self.intermediate = Some(IntermediateStep {
            cas_kt,
            flight_level,
        });
        self
    }

    /// Intermediate step if it carries a usable (non-zero) CAS.
    pub fn active_intermediate(&self) -> Option<IntermediateStep> {
        self.intermediate.filter(|step| step.cas_kt > 0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.descent_mach <= 0.0 {
            return Err(ConfigurationError::NonPositive {
                quantity: "descent Mach",
                value: self.descent_mach,
            });
        }
        if self.high_cas_kt <= 0.0 {
            return Err(ConfigurationError::NonPositive {
                quantity: "high CAS",
                value: self.high_cas_kt,
            });
        }
        if let Some(step) = self.active_intermediate() {
            if step.cas_kt > self.high_cas_kt {
                return Err(ConfigurationError::IntermediateAboveHighCas {
                    intermediate_kt: step.cas_kt,
                    high_kt: self.high_cas_kt,
                });
            }
        }
        Ok(())
    }

    /// Flight level (truncated) at which the high CAS and the descent Mach coincide.
    pub fn crossover_flight_level<O>(&self, oracle: &O) -> Result<i32, PerformanceError>
    where
        O: PerformanceOracle + ?Sized,
    {
        let altitude_m = oracle.crossover_altitude(kt_to_ms(self.high_cas_kt), self.descent_mach)?;
        Ok(ft_to_fl(m_to_ft(altitude_m)))
    }
}

/// Formats as `0.80M/310kt` or `0.73M/245kt/220kt@FL150`.
impl fmt::Display for SpeedSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}M/{:.0}kt", self.descent_mach, self.high_cas_kt)?;
        if let Some(step) = self.active_intermediate() {
            write!(f, "/{:.0}kt@FL{}", step.cas_kt, step.flight_level)?;
        }
        Ok(())
    }
}

/// Speed held at one flight level: exactly one of Mach or CAS is known up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedTarget {
    Mach(f64),
    CasKt(f64),
}

impl fmt::Display for SpeedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedTarget::Mach(mach) => write!(f, "Mach {mach:.2}"),
            SpeedTarget::CasKt(cas) => write!(f, "CAS {cas:.0}kt"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSpeed {
    pub target: SpeedTarget,
    pub evolution: FlightEvolution,
}

impl ResolvedSpeed {
    fn mach(mach: f64) -> Self {
        Self {
            target: SpeedTarget::Mach(mach),
            evolution: FlightEvolution::ConstantMach,
        }
    }

    fn cas(cas_kt: f64) -> Self {
        Self {
            target: SpeedTarget::CasKt(cas_kt),
            evolution: FlightEvolution::ConstantCas,
        }
    }

    pub fn mach_target(&self) -> Option<f64> {
        match self.target {
            SpeedTarget::Mach(mach) => Some(mach),
            SpeedTarget::CasKt(_) => None,
        }
    }

    pub fn cas_target_kt(&self) -> Option<f64> {
        match self.target {
            SpeedTarget::CasKt(cas) => Some(cas),
            SpeedTarget::Mach(_) => None,
        }
    }

    /// Speed-mode label carried by sampled points.
    pub fn label(&self) -> String {
        self.target.to_string()
    }

    /// Whether holding this speed could exceed a CAS ceiling. Mach holds always count.
    pub fn exceeds(&self, ceiling_kt: f64) -> bool {
        match self.target {
            SpeedTarget::Mach(_) => true,
            SpeedTarget::CasKt(cas) => cas > ceiling_kt,
        }
    }
}

/// Resolve the speed to hold at `flight_level`.
///
/// `forced_cas_kt` pins the CAS and skips the schedule entirely. Otherwise, in order:
/// no intermediate step and at or above the crossover holds Mach; at or above the
/// intermediate trigger holds the high CAS; below it holds the intermediate CAS; anything
/// else holds the high CAS.
pub fn resolve_speed(
    flight_level: i32,
    crossover_fl: i32,
    schedule: &SpeedSchedule,
    forced_cas_kt: Option<f64>,
) -> ResolvedSpeed {
    if let Some(cas) = forced_cas_kt {
        return ResolvedSpeed::cas(cas);
    }
    match schedule.active_intermediate() {
        None if flight_level >= crossover_fl => ResolvedSpeed::mach(schedule.descent_mach),
        Some(step) if flight_level >= step.flight_level => ResolvedSpeed::cas(schedule.high_cas_kt),
        Some(step) => ResolvedSpeed::cas(step.cas_kt),
        None => ResolvedSpeed::cas(schedule.high_cas_kt),
    }
}
