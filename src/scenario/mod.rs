use std::path::Path;

use descent_config::{ConfigError, ScenarioConfig, load_scenarios};
use descent_performance::{ParametricAircraft, PerformanceError};
use descent_trajectory::{DescentRequest, RtaQuery, TripRequest};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to load scenario: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build performance model: {0}")]
    Performance(#[from] PerformanceError),
    #[error("scenario '{0}' not found")]
    NotFound(String),
    #[error("scenario file contains no scenarios")]
    Empty,
}

/// A validated scenario with its aircraft performance model.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: ScenarioConfig,
    pub aircraft: ParametricAircraft,
}

/// Load the scenario named `name` (or the first one) and build its aircraft model.
pub fn load_scenario<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<Scenario, ScenarioError> {
    let scenarios = load_scenarios(path)?;
    let config = match name {
        Some(name) => scenarios
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ScenarioError::NotFound(name.to_string()))?,
        None => scenarios.into_iter().next().ok_or(ScenarioError::Empty)?,
    };
    Scenario::from_config(config)
}

impl Scenario {
    pub fn from_config(config: ScenarioConfig) -> Result<Self, ScenarioError> {
        let aircraft = ParametricAircraft::from_catalog(&config.performance_model, &config.aircraft)?;
        info!(
            scenario = %config.name,
            aircraft = %config.aircraft,
            model_version = aircraft.model_version(),
            "scenario loaded"
        );
        Ok(Self { config, aircraft })
    }

    pub fn trip_request(&self) -> TripRequest {
        TripRequest {
            origin_fl: self.config.origin_fl,
            target_fl: self.config.target_fl,
            mass_kg: self.config.mass_kg,
            route_length_nm: self.config.route_length_nm,
            delta_temp_k: self.config.delta_temp_k,
        }
    }

    pub fn descent_request(&self) -> DescentRequest {
        self.trip_request().descent()
    }

    /// Search query for `rta_s` using the scenario's tolerance and result limit.
    pub fn rta_query(&self, rta_s: f64) -> RtaQuery {
        RtaQuery::new(rta_s, self.config.tolerance_s, self.config.max_results)
    }
}
