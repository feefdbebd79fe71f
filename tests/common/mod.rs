#![allow(dead_code)]

use descent_planner::config::PerformanceModelConfig;
use descent_planner::performance::{
    AeroConfiguration, AtmosphereState, FlightEvolution, FlightPhase, ParametricAircraft,
    PerformanceError, PerformanceOracle,
};
use descent_planner::trajectory::TripRequest;

pub const CATALOG: &str = "configs/aircraft";
pub const SCENARIOS: &str = "configs/scenarios/descents.yaml";

pub fn model_config() -> PerformanceModelConfig {
    PerformanceModelConfig {
        version: "parametric-1".into(),
        catalog_path: CATALOG.into(),
    }
}

pub fn a320() -> ParametricAircraft {
    ParametricAircraft::from_catalog(&model_config(), "A320-232").expect("A320 in catalog")
}

/// FL370 to FL30, 60 t, 200 nm, ISA.
pub fn reference_trip() -> TripRequest {
    TripRequest {
        origin_fl: 370,
        target_fl: 30,
        mass_kg: 60_000.0,
        route_length_nm: 200.0,
        delta_temp_k: 0.0,
    }
}

/// Misbehaviour injected by [`FaultyOracle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fault {
    /// Crossover queries for this descent Mach fail.
    CrossoverAt(f64),
    /// Every level reports a zero vertical speed.
    ZeroRate,
    /// Mach converts to a zero true airspeed.
    ZeroTas,
}

/// Delegates to the A320 model except for one injected fault.
pub struct FaultyOracle {
    pub inner: ParametricAircraft,
    pub fault: Fault,
}

impl FaultyOracle {
    pub fn failing_at(fail_mach: f64) -> Self {
        Self::with_fault(Fault::CrossoverAt(fail_mach))
    }

    pub fn zero_rate() -> Self {
        Self::with_fault(Fault::ZeroRate)
    }

    pub fn zero_tas() -> Self {
        Self::with_fault(Fault::ZeroTas)
    }

    fn with_fault(fault: Fault) -> Self {
        Self {
            inner: a320(),
            fault,
        }
    }
}

impl PerformanceOracle for FaultyOracle {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn atmosphere(
        &self,
        altitude_m: f64,
        delta_temp_k: f64,
    ) -> Result<AtmosphereState, PerformanceError> {
        self.inner.atmosphere(altitude_m, delta_temp_k)
    }

    fn mach_to_tas(&self, mach: f64, state: &AtmosphereState) -> f64 {
        match self.fault {
            Fault::ZeroTas => 0.0,
            _ => self.inner.mach_to_tas(mach, state),
        }
    }

    fn crossover_altitude(&self, cas_m_s: f64, mach: f64) -> Result<f64, PerformanceError> {
        if let Fault::CrossoverAt(fail_mach) = self.fault {
            if (mach - fail_mach).abs() < 1e-9 {
                return Err(PerformanceError::NonPositive {
                    quantity: "injected failure",
                    value: mach,
                });
            }
        }
        self.inner.crossover_altitude(cas_m_s, mach)
    }

    fn lift_coefficient(
        &self,
        delta: f64,
        mass_kg: f64,
        mach: f64,
    ) -> Result<f64, PerformanceError> {
        self.inner.lift_coefficient(delta, mass_kg, mach)
    }

    fn drag_coefficient(
        &self,
        configuration: AeroConfiguration,
        lift_coefficient: f64,
        mach: f64,
    ) -> Result<f64, PerformanceError> {
        self.inner
            .drag_coefficient(configuration, lift_coefficient, mach)
    }

    fn drag(&self, delta: f64, mach: f64, drag_coefficient: f64) -> f64 {
        self.inner.drag(delta, mach, drag_coefficient)
    }

    fn idle_thrust(&self, delta: f64, theta: f64, mach: f64, delta_temp_k: f64) -> f64 {
        self.inner.idle_thrust(delta, theta, mach, delta_temp_k)
    }

    fn fuel_flow(&self, delta: f64, theta: f64, mach: f64, delta_temp_k: f64) -> f64 {
        self.inner.fuel_flow(delta, theta, mach, delta_temp_k)
    }

    fn rate_of_descent(
        &self,
        thrust_n: f64,
        drag_n: f64,
        tas_m_s: f64,
        mass_kg: f64,
        energy_share_factor: f64,
        altitude_m: f64,
        delta_temp_k: f64,
    ) -> Result<f64, PerformanceError> {
        if self.fault == Fault::ZeroRate {
            return Ok(0.0);
        }
        self.inner.rate_of_descent(
            thrust_n,
            drag_n,
            tas_m_s,
            mass_kg,
            energy_share_factor,
            altitude_m,
            delta_temp_k,
        )
    }

    fn energy_share_factor(
        &self,
        altitude_m: f64,
        delta_temp_k: f64,
        evolution: FlightEvolution,
        phase: FlightPhase,
        mach: f64,
    ) -> Result<f64, PerformanceError> {
        self.inner
            .energy_share_factor(altitude_m, delta_temp_k, evolution, phase, mach)
    }
}
