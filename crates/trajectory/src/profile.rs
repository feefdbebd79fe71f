//! Descent profile integration between flight levels, with deceleration segments injected.

use descent_core::constants::{FT_PER_NM, SECONDS_PER_HOUR};
use descent_core::rounding::round_to;
use descent_performance::PerformanceOracle;
use serde::Serialize;
use tracing::debug;

use crate::deceleration::{DecelerationSegment, deceleration_demand};
use crate::sampler::{DescentPoint, SampleConditions, sample_point};
use crate::schedule::{SpeedSchedule, resolve_speed};
use crate::{ConfigurationError, TrajectoryError};

/// Flight levels between two samples.
const LEVEL_STEP: usize = 10;

/// Descent geometry and aircraft state for one profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentRequest {
    pub cruise_fl: i32,
    pub target_fl: i32,
    pub mass_kg: f64,
    pub delta_temp_k: f64,
}

impl DescentRequest {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.target_fl > self.cruise_fl {
            return Err(ConfigurationError::TargetAboveCruise {
                cruise_fl: self.cruise_fl,
                target_fl: self.target_fl,
            });
        }
        if self.mass_kg <= 0.0 {
            return Err(ConfigurationError::NonPositive {
                quantity: "mass",
                value: self.mass_kg,
            });
        }
        Ok(())
    }

    fn conditions(&self) -> SampleConditions {
        SampleConditions {
            mass_kg: self.mass_kg,
            delta_temp_k: self.delta_temp_k,
        }
    }
}

/// Headline figures of a descent profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub label: String,
    pub descent_distance_nm: f64,
    pub descent_time_s: f64,
    pub fuel_kg: f64,
    pub average_fuel_flow_kg_h: f64,
    pub average_gradient_pct: f64,
    pub altitude_distance_ratio_ft_nm: f64,
}

impl ProfileSummary {
    fn from_points(label: String, request: &DescentRequest, points: &[DescentPoint]) -> Self {
        let (distance, time, fuel) = points
            .last()
            .map(|p| {
                (
                    p.cumulative_distance_nm,
                    p.cumulative_time_s,
                    p.cumulative_fuel_kg,
                )
            })
            .unwrap_or_default();
        let altitude_change_ft = f64::from(request.cruise_fl - request.target_fl) * 100.0;
        let (gradient, ratio) = if distance > 0.0 {
            (
                round_to(altitude_change_ft / FT_PER_NM / distance * 100.0, 2),
                round_to(altitude_change_ft / distance, 1),
            )
        } else {
            (0.0, 0.0)
        };
        let average_fuel_flow = if time > 0.0 {
            round_to(fuel / (time / SECONDS_PER_HOUR), 1)
        } else {
            0.0
        };
        Self {
            label,
            descent_distance_nm: round_to(distance, 1),
            descent_time_s: round_to(time, 0),
            fuel_kg: round_to(fuel, 1),
            average_fuel_flow_kg_h: average_fuel_flow,
            average_gradient_pct: gradient,
            altitude_distance_ratio_ft_nm: ratio,
        }
    }
}

/// A complete descent: ordered points, deceleration log and summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescentProfile {
    pub schedule: SpeedSchedule,
    pub crossover_fl: i32,
    pub summary: ProfileSummary,
    pub points: Vec<DescentPoint>,
    pub decelerations: Vec<DecelerationSegment>,
}

/// Levels from `cruise_fl` down to `target_fl` every 10 FL, ending exactly at `target_fl`.
pub fn flight_levels(cruise_fl: i32, target_fl: i32) -> Vec<i32> {
    if target_fl > cruise_fl {
        return Vec::new();
    }
    let mut levels: Vec<i32> = (target_fl..=cruise_fl)
        .rev()
        .step_by(LEVEL_STEP)
        .collect();
    if levels.last() != Some(&target_fl) {
        levels.push(target_fl);
    }
    levels
}

/// Distance, time and fuel accumulated along the descent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    distance_nm: f64,
    time_s: f64,
    fuel_kg: f64,
}

impl Totals {
    fn plus(self, distance_nm: f64, time_s: f64, fuel_kg: f64) -> Self {
        Self {
            distance_nm: self.distance_nm + distance_nm,
            time_s: self.time_s + time_s,
            fuel_kg: self.fuel_kg + fuel_kg,
        }
    }

    fn stamp(&self, mut point: DescentPoint) -> DescentPoint {
        point.cumulative_distance_nm = round_to(self.distance_nm, 1);
        point.cumulative_time_s = round_to(self.time_s, 0);
        point.cumulative_fuel_kg = round_to(self.fuel_kg, 1);
        point
    }
}

/// State carried from one level to the next: running totals and the active CAS ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    totals: Totals,
    ceiling_kt: Option<f64>,
}

impl Accumulator {
    fn after_segment(self, previous: &DescentPoint, current: &DescentPoint) -> Self {
        let altitude_drop_ft = previous.altitude_ft - current.altitude_ft;
        let mean_ratio =
            (previous.altitude_distance_ratio_ft_nm + current.altitude_distance_ratio_ft_nm) / 2.0;
        let distance = if mean_ratio > 0.0 {
            altitude_drop_ft / mean_ratio
        } else {
            0.0
        };
        let mean_tas_nm_s = (previous.tas_kt + current.tas_kt) / 2.0 / SECONDS_PER_HOUR;
        let time = if mean_tas_nm_s > 0.0 {
            distance / mean_tas_nm_s
        } else {
            0.0
        };
        let fuel = (previous.fuel_flow_kg_s + current.fuel_flow_kg_s) / 2.0 * time;
        Self {
            totals: self.totals.plus(distance, time, fuel),
            ..self
        }
    }

    fn after_deceleration(self, segment: &DecelerationSegment) -> Self {
        Self {
            totals: self
                .totals
                .plus(segment.distance_nm, segment.time_s, segment.fuel_kg),
            ceiling_kt: Some(segment.cas_after_kt),
        }
    }
}

/// Build the descent profile flown with `schedule`.
pub fn compute_descent_profile<O>(
    oracle: &O,
    request: &DescentRequest,
    schedule: &SpeedSchedule,
) -> Result<DescentProfile, TrajectoryError>
where
    O: PerformanceOracle + ?Sized,
{
    request.validate()?;
    schedule.validate()?;
    let crossover_fl = schedule.crossover_flight_level(oracle)?;
    let conditions = request.conditions();
    let levels = flight_levels(request.cruise_fl, request.target_fl);

    let mut points: Vec<DescentPoint> = Vec::with_capacity(levels.len() + 3);
    let mut decelerations = Vec::new();
    let mut acc = Accumulator::default();

    for level in levels {
        let natural = resolve_speed(level, crossover_fl, schedule, None);
        let speed = match acc.ceiling_kt {
            Some(ceiling) if natural.exceeds(ceiling) => {
                resolve_speed(level, crossover_fl, schedule, Some(ceiling))
            }
            _ => natural,
        };
        let sampled = sample_point(oracle, &conditions, level, &speed)?;
        if let Some(previous) = points.last() {
            acc = acc.after_segment(previous, &sampled);
        }
        let point = acc.totals.stamp(sampled);
        let demand = deceleration_demand(level, point.cas_kt, schedule);
        let segment = demand.map(|demand| DecelerationSegment::at(&point, demand));
        points.push(point);

        if let Some(segment) = segment {
            acc = acc.after_deceleration(&segment);
            let forced = resolve_speed(level, crossover_fl, schedule, Some(segment.cas_after_kt));
            let mut slowed = sample_point(oracle, &conditions, level, &forced)?;
            slowed.is_deceleration_point = true;
            debug!(
                flight_level = level,
                trigger = %segment.trigger,
                from_kt = segment.cas_before_kt,
                to_kt = segment.cas_after_kt,
                "deceleration segment inserted"
            );
            points.push(acc.totals.stamp(slowed));
            decelerations.push(segment);
        }
    }

    let summary = ProfileSummary::from_points(schedule.to_string(), request, &points);
    debug!(
        profile = %summary.label,
        distance_nm = summary.descent_distance_nm,
        time_s = summary.descent_time_s,
        "descent profile computed"
    );
    Ok(DescentProfile {
        schedule: *schedule,
        crossover_fl,
        summary,
        points,
        decelerations,
    })
}
