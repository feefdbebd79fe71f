//! Performance sampling at a single flight level.

use descent_core::constants::{FT_MIN_PER_M_S, SECONDS_PER_HOUR};
use descent_core::rounding::round_to;
use descent_core::units::{fl_to_ft, ft_to_m, kt_to_ms, ms_to_kt};
use descent_performance::{AeroConfiguration, FlightPhase, PerformanceError, PerformanceOracle};
use serde::Serialize;

use crate::schedule::{ResolvedSpeed, SpeedTarget};

/// Aircraft state shared by every sample of one descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleConditions {
    pub mass_kg: f64,
    pub delta_temp_k: f64,
}

/// One row of a descent profile. Published quantities are already rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescentPoint {
    pub flight_level: i32,
    pub altitude_ft: f64,
    pub speed_mode: String,
    pub mach: f64,
    pub cas_kt: f64,
    pub tas_kt: f64,
    pub descent_rate_ft_min: f64,
    pub descent_rate_m_s: f64,
    pub descent_angle_deg: f64,
    pub descent_gradient_pct: f64,
    pub altitude_distance_ratio_ft_nm: f64,
    pub energy_share_factor: f64,
    pub drag_n: f64,
    pub idle_thrust_n: f64,
    pub fuel_flow_kg_h: f64,
    pub fuel_flow_kg_s: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub is_deceleration_point: bool,
    pub cumulative_distance_nm: f64,
    pub cumulative_time_s: f64,
    pub cumulative_fuel_kg: f64,
}

/// Sample idle-descent performance at `flight_level` holding `speed`, clean configuration.
///
/// Cumulative fields are left at zero; the integrator fills them in.
pub fn sample_point<O>(
    oracle: &O,
    conditions: &SampleConditions,
    flight_level: i32,
    speed: &ResolvedSpeed,
) -> Result<DescentPoint, PerformanceError>
where
    O: PerformanceOracle + ?Sized,
{
    let altitude_ft = fl_to_ft(flight_level);
    let altitude_m = ft_to_m(altitude_ft);
    let delta_temp = conditions.delta_temp_k;
    let atmosphere = oracle.atmosphere(altitude_m, delta_temp)?;

    let (mach, cas, tas) = match speed.target {
        SpeedTarget::Mach(mach) => (
            mach,
            oracle.mach_to_cas(mach, &atmosphere),
            oracle.mach_to_tas(mach, &atmosphere),
        ),
        SpeedTarget::CasKt(cas_kt) => {
            let cas = kt_to_ms(cas_kt);
            let tas = oracle.cas_to_tas(cas, &atmosphere);
            (oracle.tas_to_mach(tas, &atmosphere), cas, tas)
        }
    };

    let esf = oracle.energy_share_factor(
        altitude_m,
        delta_temp,
        speed.evolution,
        FlightPhase::Descent,
        mach,
    )?;
    let cl = oracle.lift_coefficient(atmosphere.delta, conditions.mass_kg, mach)?;
    let cd = oracle.drag_coefficient(AeroConfiguration::CLEAN, cl, mach)?;
    let drag = oracle.drag(atmosphere.delta, mach, cd);
    let thrust = oracle.idle_thrust(atmosphere.delta, atmosphere.theta, mach, delta_temp);
    let fuel_flow = oracle.fuel_flow(atmosphere.delta, atmosphere.theta, mach, delta_temp);
    let rate = oracle.rate_of_descent(
        thrust,
        drag,
        tas,
        conditions.mass_kg,
        esf,
        altitude_m,
        delta_temp,
    )?;

    let tas_kt = ms_to_kt(tas);
    let (angle, gradient) = if tas > 0.0 {
        ((rate / tas).asin().to_degrees(), 100.0 * (rate / tas).abs())
    } else {
        (0.0, 0.0)
    };
    let ratio = if tas_kt > 0.0 {
        (rate * FT_MIN_PER_M_S / tas_kt * 60.0).abs()
    } else {
        0.0
    };

    Ok(DescentPoint {
        flight_level,
        altitude_ft,
        speed_mode: speed.label(),
        mach: round_to(mach, 3),
        cas_kt: round_to(ms_to_kt(cas), 1),
        tas_kt: round_to(tas_kt, 1),
        descent_rate_ft_min: round_to(rate * FT_MIN_PER_M_S, 0),
        descent_rate_m_s: round_to(rate, 2),
        descent_angle_deg: round_to(angle, 2),
        descent_gradient_pct: round_to(gradient, 2),
        altitude_distance_ratio_ft_nm: round_to(ratio, 0),
        energy_share_factor: round_to(esf, 3),
        drag_n: round_to(drag, 0),
        idle_thrust_n: round_to(thrust, 0),
        fuel_flow_kg_h: round_to(fuel_flow * SECONDS_PER_HOUR, 1),
        fuel_flow_kg_s: round_to(fuel_flow, 4),
        lift_coefficient: round_to(cl, 3),
        drag_coefficient: round_to(cd, 4),
        is_deceleration_point: false,
        cumulative_distance_nm: 0.0,
        cumulative_time_s: 0.0,
        cumulative_fuel_kg: 0.0,
    })
}
