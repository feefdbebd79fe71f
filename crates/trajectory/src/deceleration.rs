//! Level-flight deceleration segments inserted at speed-restriction levels.

use std::fmt;

use serde::Serialize;

use crate::sampler::DescentPoint;
use crate::schedule::SpeedSchedule;

/// Flight level of the regulatory speed limit.
pub const REGULATORY_FL: i32 = 100;
pub const REGULATORY_CAS_KT: f64 = 250.0;
/// Flight level of the approach speed limit.
pub const APPROACH_FL: i32 = 30;
pub const APPROACH_CAS_KT: f64 = 220.0;

/// Knots of CAS lost per nautical mile of level flight.
const KT_LOST_PER_NM: f64 = 10.0;
/// Seconds spent per knot of CAS lost.
const TIME_PER_KT_S: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecelerationTrigger {
    Regulatory,
    Profile,
    Approach,
}

impl fmt::Display for DecelerationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecelerationTrigger::Regulatory => "regulatory",
            DecelerationTrigger::Profile => "profile",
            DecelerationTrigger::Approach => "approach",
        };
        f.write_str(name)
    }
}

/// Deceleration required at one flight level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecelerationDemand {
    pub trigger: DecelerationTrigger,
    pub target_cas_kt: f64,
}

/// Decide whether a point sampled at `flight_level` with `cas_kt` must slow down.
///
/// At most one trigger fires per level. When levels coincide the profile step wins over the
/// regulatory limit, which wins over the approach limit.
pub fn deceleration_demand(
    flight_level: i32,
    cas_kt: f64,
    schedule: &SpeedSchedule,
) -> Option<DecelerationDemand> {
    let profile = schedule
        .active_intermediate()
        .filter(|step| step.flight_level == flight_level && cas_kt > step.cas_kt)
        .map(|step| (DecelerationTrigger::Profile, step.cas_kt));
    let regulatory = (flight_level == REGULATORY_FL && cas_kt > REGULATORY_CAS_KT)
        .then_some((DecelerationTrigger::Regulatory, REGULATORY_CAS_KT));
    let approach = (flight_level == APPROACH_FL && cas_kt > APPROACH_CAS_KT)
        .then_some((DecelerationTrigger::Approach, APPROACH_CAS_KT));

    profile
        .or(regulatory)
        .or(approach)
        .map(|(trigger, target_cas_kt)| DecelerationDemand {
            trigger,
            target_cas_kt,
        })
}

/// Cost and bookkeeping of one level deceleration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecelerationSegment {
    pub trigger: DecelerationTrigger,
    pub flight_level: i32,
    pub cas_before_kt: f64,
    pub cas_after_kt: f64,
    pub distance_nm: f64,
    pub time_s: f64,
    pub fuel_kg: f64,
    pub tas_kt: f64,
}

impl DecelerationSegment {
    /// Price the deceleration from `point` (sampled before slowing) to the demanded CAS.
    pub fn at(point: &DescentPoint, demand: DecelerationDemand) -> Self {
        let delta_cas = point.cas_kt - demand.target_cas_kt;
        let time_s = delta_cas * TIME_PER_KT_S;
        Self {
            trigger: demand.trigger,
            flight_level: point.flight_level,
            cas_before_kt: point.cas_kt,
            cas_after_kt: demand.target_cas_kt,
            distance_nm: delta_cas / KT_LOST_PER_NM,
            time_s,
            fuel_kg: point.fuel_flow_kg_s * time_s,
            tas_kt: point.tas_kt,
        }
    }
}
