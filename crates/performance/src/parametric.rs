use descent_config::{AircraftConfig, PerformanceModelConfig, load_aircraft_catalog};
use descent_core::atmosphere::{self, AtmosphereState};
use descent_core::constants::{G0, KAPPA, LAPSE_RATE_K_M, P0_PA, R_AIR, TROPOPAUSE_M};
use descent_core::units::ft_to_m;
use tracing::debug;

use crate::oracle::{AeroConfiguration, FlightEvolution, FlightPhase, GearState};
use crate::{PerformanceError, PerformanceOracle};

const MIN_ALTITUDE_M: f64 = -500.0;
/// Energy share factor accelerating in climb or decelerating in descent.
const ESF_SPEED_CHANGE_AGAINST: f64 = 0.3;
/// Energy share factor decelerating in climb or accelerating in descent.
const ESF_SPEED_CHANGE_WITH: f64 = 1.7;

/// Quadratic-polar aircraft model with idle thrust and fuel flow linear in Mach.
#[derive(Debug, Clone)]
pub struct ParametricAircraft {
    model_version: String,
    aircraft: AircraftConfig,
}

impl ParametricAircraft {
    /// Build the model for one catalog entry under the given model settings.
    pub fn new(
        model: &PerformanceModelConfig,
        aircraft: AircraftConfig,
    ) -> Result<Self, PerformanceError> {
        aircraft.validate()?;
        debug!(
            aircraft = %aircraft.name,
            version = %model.version,
            "parametric performance model ready"
        );
        Ok(Self {
            model_version: model.version.clone(),
            aircraft,
        })
    }

    /// Load the catalog named by `model` and pick `name` (case-insensitive).
    pub fn from_catalog(model: &PerformanceModelConfig, name: &str) -> Result<Self, PerformanceError> {
        let catalog = load_aircraft_catalog(&model.catalog_path)?;
        let aircraft = catalog
            .into_iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PerformanceError::UnknownAircraft(name.to_string()))?;
        Self::new(model, aircraft)
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn aircraft(&self) -> &AircraftConfig {
        &self.aircraft
    }

    fn max_altitude_m(&self) -> f64 {
        ft_to_m(self.aircraft.max_altitude_ft)
    }

    fn check_altitude(&self, altitude_m: f64) -> Result<(), PerformanceError> {
        let max_m = self.max_altitude_m();
        if !(MIN_ALTITUDE_M..=max_m).contains(&altitude_m) {
            return Err(PerformanceError::AltitudeOutOfRange {
                altitude_m,
                min_m: MIN_ALTITUDE_M,
                max_m,
            });
        }
        Ok(())
    }

    fn dynamic_pressure_area(&self, delta: f64, mach: f64) -> f64 {
        0.5 * KAPPA * P0_PA * delta * mach * mach * self.aircraft.wing_area_m2
    }
}

fn positive(quantity: &'static str, value: f64) -> Result<(), PerformanceError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(PerformanceError::NonPositive { quantity, value })
    }
}

impl PerformanceOracle for ParametricAircraft {
    fn model_name(&self) -> &str {
        &self.aircraft.name
    }

    fn atmosphere(
        &self,
        altitude_m: f64,
        delta_temp_k: f64,
    ) -> Result<AtmosphereState, PerformanceError> {
        self.check_altitude(altitude_m)?;
        Ok(atmosphere::isa(altitude_m, delta_temp_k))
    }

    fn lift_coefficient(
        &self,
        delta: f64,
        mass_kg: f64,
        mach: f64,
    ) -> Result<f64, PerformanceError> {
        let (min_kg, max_kg) = (self.aircraft.min_mass_kg, self.aircraft.max_mass_kg);
        if !(min_kg..=max_kg).contains(&mass_kg) {
            return Err(PerformanceError::MassOutOfRange {
                mass_kg,
                min_kg,
                max_kg,
            });
        }
        positive("pressure ratio", delta)?;
        positive("Mach", mach)?;
        Ok(mass_kg * G0 / self.dynamic_pressure_area(delta, mach))
    }

    fn drag_coefficient(
        &self,
        configuration: AeroConfiguration,
        lift_coefficient: f64,
        _mach: f64,
    ) -> Result<f64, PerformanceError> {
        let polar = self
            .aircraft
            .drag_polars
            .iter()
            .find(|polar| polar.high_lift == configuration.high_lift)
            .ok_or(PerformanceError::UnknownHighLift(configuration.high_lift))?;
        let gear = match configuration.gear {
            GearState::Up => 0.0,
            GearState::Down => self.aircraft.gear_down_cd0,
        };
        Ok(polar.cd0 + gear + polar.cd2 * lift_coefficient * lift_coefficient)
    }

    fn drag(&self, delta: f64, mach: f64, drag_coefficient: f64) -> f64 {
        self.dynamic_pressure_area(delta, mach) * drag_coefficient
    }

    fn idle_thrust(&self, delta: f64, _theta: f64, mach: f64, _delta_temp_k: f64) -> f64 {
        let coeffs = self.aircraft.idle_thrust;
        delta * (coeffs.sea_level_n - coeffs.mach_slope_n * mach)
    }

    fn fuel_flow(&self, delta: f64, theta: f64, mach: f64, _delta_temp_k: f64) -> f64 {
        let coeffs = self.aircraft.idle_fuel;
        delta / theta.sqrt() * (coeffs.base_kg_s + coeffs.mach_slope_kg_s * mach)
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
        positive("mass", mass_kg)?;
        let temperature = self.atmosphere(altitude_m, delta_temp_k)?.temperature_k();
        let temperature_ratio = (temperature - delta_temp_k) / temperature;
        Ok(temperature_ratio * (thrust_n - drag_n) * tas_m_s * energy_share_factor / (mass_kg * G0))
    }

    fn energy_share_factor(
        &self,
        altitude_m: f64,
        delta_temp_k: f64,
        evolution: FlightEvolution,
        phase: FlightPhase,
        mach: f64,
    ) -> Result<f64, PerformanceError> {
        let temperature = self.atmosphere(altitude_m, delta_temp_k)?.temperature_k();
        let below_tropopause = altitude_m < TROPOPAUSE_M;
        let lapse_term = KAPPA * R_AIR * LAPSE_RATE_K_M / (2.0 * G0)
            * mach
            * mach
            * (temperature - delta_temp_k)
            / temperature;
        let base = 1.0 + 0.2 * mach * mach;
        let compressibility_term = base.powf(-2.5) * (base.powf(3.5) - 1.0);

        let esf = match (evolution, phase) {
            (FlightEvolution::ConstantMach, _) if below_tropopause => 1.0 / (1.0 + lapse_term),
            (FlightEvolution::ConstantMach, _) => 1.0,
            (FlightEvolution::ConstantCas, _) if below_tropopause => {
                1.0 / (1.0 + lapse_term + compressibility_term)
            }
            (FlightEvolution::ConstantCas, _) => 1.0 / (1.0 + compressibility_term),
            (FlightEvolution::Accelerating, FlightPhase::Climb)
            | (FlightEvolution::Decelerating, FlightPhase::Descent) => ESF_SPEED_CHANGE_AGAINST,
            (FlightEvolution::Accelerating, FlightPhase::Descent)
            | (FlightEvolution::Decelerating, FlightPhase::Climb) => ESF_SPEED_CHANGE_WITH,
        };
        Ok(esf)
    }
}
