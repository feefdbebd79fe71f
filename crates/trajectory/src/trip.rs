//! Trip ETAs: cruise leg plus descent, and the fastest/slowest ETA bracket.

use descent_core::constants::SECONDS_PER_HOUR;
use descent_core::rounding::round_to;
use descent_core::units::{fl_to_ft, ft_to_m, ms_to_kt};
use descent_performance::PerformanceOracle;
use serde::Serialize;
use tracing::{info, warn};

use crate::profile::{DescentProfile, DescentRequest, compute_descent_profile};
use crate::schedule::SpeedSchedule;
use crate::{BracketSide, ConfigurationError, TrajectoryError};

/// Route and aircraft state for a cruise-then-descend trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripRequest {
    pub origin_fl: i32,
    pub target_fl: i32,
    pub mass_kg: f64,
    pub route_length_nm: f64,
    pub delta_temp_k: f64,
}

impl TripRequest {
    pub fn descent(&self) -> DescentRequest {
        DescentRequest {
            cruise_fl: self.origin_fl,
            target_fl: self.target_fl,
            mass_kg: self.mass_kg,
            delta_temp_k: self.delta_temp_k,
        }
    }
}

/// ETA of one trip flown with a given schedule, zero wind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripEstimate {
    pub schedule: SpeedSchedule,
    pub cruise_distance_nm: f64,
    pub cruise_ground_speed_kt: f64,
    pub cruise_time_s: f64,
    pub descent_time_s: f64,
    pub eta_s: f64,
    pub profile: DescentProfile,
}

/// Fly the route level at the origin FL with the schedule's Mach, then descend.
pub fn assemble_trip<O>(
    oracle: &O,
    request: &TripRequest,
    schedule: &SpeedSchedule,
) -> Result<TripEstimate, TrajectoryError>
where
    O: PerformanceOracle + ?Sized,
{
    if request.route_length_nm <= 0.0 {
        return Err(ConfigurationError::NonPositive {
            quantity: "route length",
            value: request.route_length_nm,
        }
        .into());
    }
    let profile = compute_descent_profile(oracle, &request.descent(), schedule)?;
    let descent_distance = profile.summary.descent_distance_nm;
    let cruise_distance = request.route_length_nm - descent_distance;
    if cruise_distance < 0.0 {
        return Err(ConfigurationError::NegativeCruiseDistance {
            route_nm: request.route_length_nm,
            descent_nm: descent_distance,
        }
        .into());
    }

    let cruise_altitude_m = ft_to_m(fl_to_ft(request.origin_fl));
    let atmosphere = oracle.atmosphere(cruise_altitude_m, request.delta_temp_k)?;
    let ground_speed_kt = round_to(
        ms_to_kt(oracle.mach_to_tas(schedule.descent_mach, &atmosphere)),
        1,
    );
    if ground_speed_kt <= 0.0 {
        return Err(ConfigurationError::NonPositive {
            quantity: "cruise ground speed",
            value: ground_speed_kt,
        }
        .into());
    }
    let cruise_time = round_to(cruise_distance / ground_speed_kt * SECONDS_PER_HOUR, 1);
    let descent_time = round_to(profile.summary.descent_time_s, 1);

    Ok(TripEstimate {
        schedule: *schedule,
        cruise_distance_nm: cruise_distance,
        cruise_ground_speed_kt: ground_speed_kt,
        cruise_time_s: cruise_time,
        descent_time_s: descent_time,
        eta_s: round_to(cruise_time + descent_time, 1),
        profile,
    })
}

/// Earliest and latest achievable ETAs for a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtaBracket {
    pub fastest: TripEstimate,
    pub slowest: TripEstimate,
}

impl EtaBracket {
    pub fn eta_min_s(&self) -> f64 {
        self.fastest.eta_s
    }

    pub fn eta_max_s(&self) -> f64 {
        self.slowest.eta_s
    }

    pub fn window_s(&self) -> f64 {
        self.eta_max_s() - self.eta_min_s()
    }

    /// Where `rta_s` falls in the window, clamped to [0, 1]. A degenerate window gives 0.
    pub fn relative_position(&self, rta_s: f64) -> f64 {
        let window = self.window_s();
        if window <= 0.0 {
            return 0.0;
        }
        ((rta_s - self.eta_min_s()) / window).clamp(0.0, 1.0)
    }
}

fn bracket_side<O>(
    oracle: &O,
    request: &TripRequest,
    side: BracketSide,
) -> Result<TripEstimate, TrajectoryError>
where
    O: PerformanceOracle + ?Sized,
{
    let schedule = match side {
        BracketSide::Fastest => SpeedSchedule::FASTEST,
        BracketSide::Slowest => SpeedSchedule::SLOWEST,
    };
    assemble_trip(oracle, request, &schedule).map_err(|err| match err {
        TrajectoryError::Oracle(source) => TrajectoryError::BracketUnavailable { side, source },
        other => other,
    })
}

/// ETAmin from the fast canonical schedule, ETAmax from the slow one.
pub fn compute_eta_bracket<O>(oracle: &O, request: &TripRequest) -> Result<EtaBracket, TrajectoryError>
where
    O: PerformanceOracle + ?Sized,
{
    let fastest = bracket_side(oracle, request, BracketSide::Fastest)?;
    let slowest = bracket_side(oracle, request, BracketSide::Slowest)?;
    let bracket = EtaBracket { fastest, slowest };
    if bracket.window_s() < 0.0 {
        warn!(
            eta_min_s = bracket.eta_min_s(),
            eta_max_s = bracket.eta_max_s(),
            "fast schedule arrives later than slow schedule"
        );
    }
    info!(
        aircraft = oracle.model_name(),
        eta_min_s = bracket.eta_min_s(),
        eta_max_s = bracket.eta_max_s(),
        window_s = bracket.window_s(),
        "ETA bracket computed"
    );
    Ok(bracket)
}
