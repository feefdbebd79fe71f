//! Configuration models and loaders for the descent planner.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Aircraft performance coefficients parsed from the aircraft catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct AircraftConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub wing_area_m2: f64,
    pub min_mass_kg: f64,
    pub max_mass_kg: f64,
    pub max_altitude_ft: f64,
    pub drag_polars: Vec<DragPolarConfig>,
    /// Parasitic drag added with the landing gear extended.
    #[serde(default)]
    pub gear_down_cd0: f64,
    pub idle_thrust: IdleThrustConfig,
    pub idle_fuel: IdleFuelConfig,
}

/// Quadratic drag polar for one high-lift setting (0 is clean).
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct DragPolarConfig {
    pub high_lift: u8,
    pub cd0: f64,
    pub cd2: f64,
}

/// Idle thrust model `delta * (sea_level_n - mach_slope_n * M)`.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct IdleThrustConfig {
    pub sea_level_n: f64,
    pub mach_slope_n: f64,
}

/// Idle fuel-flow model `delta / sqrt(theta) * (base_kg_s + mach_slope_kg_s * M)`.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct IdleFuelConfig {
    pub base_kg_s: f64,
    pub mach_slope_kg_s: f64,
}

/// Performance model selection handed to the oracle at construction.
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceModelConfig {
    pub version: String,
    pub catalog_path: PathBuf,
}

/// Trip scenario: route, altitudes, aircraft and search settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    pub aircraft: String,
    pub origin_fl: i32,
    pub target_fl: i32,
    pub mass_kg: f64,
    pub route_length_nm: f64,
    #[serde(default = "default_tolerance_s")]
    pub tolerance_s: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub delta_temp_k: f64,
    pub performance_model: PerformanceModelConfig,
}

fn default_tolerance_s() -> f64 {
    10.0
}

fn default_max_results() -> usize {
    5
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid aircraft '{name}': {reason}")]
    InvalidAircraft { name: String, reason: String },
    #[error("invalid scenario '{name}': {reason}")]
    InvalidScenario { name: String, reason: String },
}

impl AircraftConfig {
    /// Reject coefficient sets the performance model cannot evaluate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason: &str| ConfigError::InvalidAircraft {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.wing_area_m2 <= 0.0 {
            return Err(fail("wing area must be positive"));
        }
        if self.min_mass_kg <= 0.0 || self.max_mass_kg <= self.min_mass_kg {
            return Err(fail("mass envelope must satisfy 0 < min < max"));
        }
        if self.max_altitude_ft <= 0.0 {
            return Err(fail("maximum altitude must be positive"));
        }
        if !self.drag_polars.iter().any(|polar| polar.high_lift == 0) {
            return Err(fail("a clean (high_lift = 0) drag polar is required"));
        }
        if self
            .drag_polars
            .iter()
            .any(|polar| polar.cd0 < 0.0 || polar.cd2 < 0.0)
        {
            return Err(fail("drag polar coefficients must be non-negative"));
        }
        Ok(())
    }
}

impl ScenarioConfig {
    /// Check the scenario describes a descent the planner can run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason: String| ConfigError::InvalidScenario {
            name: self.name.clone(),
            reason,
        };
        if self.target_fl > self.origin_fl {
            return Err(fail(format!(
                "target FL{} is above origin FL{}",
                self.target_fl, self.origin_fl
            )));
        }
        if self.target_fl < 0 {
            return Err(fail("target flight level must be non-negative".into()));
        }
        if self.mass_kg <= 0.0 {
            return Err(fail("mass must be positive".into()));
        }
        if self.route_length_nm <= 0.0 {
            return Err(fail("route length must be positive".into()));
        }
        if self.tolerance_s < 0.0 {
            return Err(fail("tolerance must be non-negative".into()));
        }
        if self.max_results == 0 {
            return Err(fail("max_results must be at least 1".into()));
        }
        Ok(())
    }
}

/// Load aircraft records from a catalog directory of TOML files, a single TOML file, or a YAML list.
pub fn load_aircraft_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftConfig>, ConfigError> {
    let aircraft: Vec<AircraftConfig> = load_records(path)?;
    for record in &aircraft {
        record.validate()?;
    }
    Ok(aircraft)
}

/// Load scenarios from YAML or TOML. Relative catalog paths resolve against the file's directory.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let path = path.as_ref();
    let mut scenarios: Vec<ScenarioConfig> = load_records(path)?;
    let base = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty() && !path.is_dir())
        .map(Path::to_path_buf);
    for scenario in &mut scenarios {
        scenario.validate()?;
        if let Some(base) = &base {
            let catalog = &scenario.performance_model.catalog_path;
            if catalog.is_relative() {
                scenario.performance_model.catalog_path = base.join(catalog);
            }
        }
    }
    Ok(scenarios)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
