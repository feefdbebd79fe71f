use descent_core::atmosphere::{self, AtmosphereState};

use crate::PerformanceError;

/// How speed evolves while the energy share factor is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvolution {
    ConstantMach,
    ConstantCas,
    Accelerating,
    Decelerating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    Climb,
    Descent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GearState {
    Up,
    Down,
}

/// High-lift setting and landing gear position selecting a drag polar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeroConfiguration {
    pub high_lift: u8,
    pub gear: GearState,
}

impl AeroConfiguration {
    /// Flaps retracted, gear up.
    pub const CLEAN: AeroConfiguration = AeroConfiguration {
        high_lift: 0,
        gear: GearState::Up,
    };
}

/// Aerodynamic, propulsive and atmospheric queries the trajectory engine depends on.
///
/// Implementations must be deterministic. Inputs outside the model envelope fail with a
/// [`PerformanceError`]. Speeds are in m/s, altitudes in metres, masses in kg, forces in N.
/// The speed conversions default to the ISA relations in [`descent_core::atmosphere`].
pub trait PerformanceOracle: Send + Sync {
    /// Aircraft model identifier used in logs and reports.
    fn model_name(&self) -> &str;

    fn atmosphere(
        &self,
        altitude_m: f64,
        delta_temp_k: f64,
    ) -> Result<AtmosphereState, PerformanceError>;

    fn mach_to_tas(&self, mach: f64, state: &AtmosphereState) -> f64 {
        atmosphere::mach_to_tas(mach, state)
    }

    fn tas_to_mach(&self, tas_m_s: f64, state: &AtmosphereState) -> f64 {
        atmosphere::tas_to_mach(tas_m_s, state)
    }

    fn cas_to_tas(&self, cas_m_s: f64, state: &AtmosphereState) -> f64 {
        atmosphere::cas_to_tas(cas_m_s, state)
    }

    fn tas_to_cas(&self, tas_m_s: f64, state: &AtmosphereState) -> f64 {
        atmosphere::tas_to_cas(tas_m_s, state)
    }

    fn mach_to_cas(&self, mach: f64, state: &AtmosphereState) -> f64 {
        atmosphere::mach_to_cas(mach, state)
    }

    /// Altitude (m) where `cas_m_s` and `mach` coincide.
    fn crossover_altitude(&self, cas_m_s: f64, mach: f64) -> Result<f64, PerformanceError> {
        if cas_m_s <= 0.0 {
            return Err(PerformanceError::NonPositive {
                quantity: "CAS",
                value: cas_m_s,
            });
        }
        if mach <= 0.0 {
            return Err(PerformanceError::NonPositive {
                quantity: "Mach",
                value: mach,
            });
        }
        Ok(atmosphere::crossover_altitude(cas_m_s, mach))
    }

    fn lift_coefficient(&self, delta: f64, mass_kg: f64, mach: f64)
    -> Result<f64, PerformanceError>;

    fn drag_coefficient(
        &self,
        configuration: AeroConfiguration,
        lift_coefficient: f64,
        mach: f64,
    ) -> Result<f64, PerformanceError>;

    fn drag(&self, delta: f64, mach: f64, drag_coefficient: f64) -> f64;

    /// Idle thrust (N) for the descent.
    fn idle_thrust(&self, delta: f64, theta: f64, mach: f64, delta_temp_k: f64) -> f64;

    /// Idle fuel flow (kg/s).
    fn fuel_flow(&self, delta: f64, theta: f64, mach: f64, delta_temp_k: f64) -> f64;

    /// Vertical speed (m/s); negative while descending.
    #[allow(clippy::too_many_arguments)]
    fn rate_of_descent(
        &self,
        thrust_n: f64,
        drag_n: f64,
        tas_m_s: f64,
        mass_kg: f64,
        energy_share_factor: f64,
        altitude_m: f64,
        delta_temp_k: f64,
    ) -> Result<f64, PerformanceError>;

    fn energy_share_factor(
        &self,
        altitude_m: f64,
        delta_temp_k: f64,
        evolution: FlightEvolution,
        phase: FlightPhase,
        mach: f64,
    ) -> Result<f64, PerformanceError>;
}
