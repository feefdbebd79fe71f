//! Shared plumbing for the descent planner binaries: logging, scenario arguments and reports.

use std::io;
use std::path::PathBuf;

use clap::Args;
use descent_planner::scenario::{Scenario, load_scenario};
use descent_planner::trajectory::{DecelerationSegment, ProfileSummary, TripEstimate};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init();
}

/// Scenario selection plus per-run overrides.
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Scenario file (YAML list or TOML)
    #[arg(long, default_value = "configs/scenarios/descents.yaml")]
    pub scenario: PathBuf,

    /// Scenario name (defaults to the first in the file)
    #[arg(long)]
    pub name: Option<String>,

    /// Cruise flight level override
    #[arg(long)]
    pub origin_fl: Option<i32>,

    /// Target flight level override
    #[arg(long)]
    pub target_fl: Option<i32>,

    /// Aircraft mass override (kg)
    #[arg(long)]
    pub mass: Option<f64>,

    /// Route length override (nm)
    #[arg(long)]
    pub route_nm: Option<f64>,

    /// ISA temperature deviation override (K)
    #[arg(long)]
    pub delta_temp: Option<f64>,
}

impl ScenarioArgs {
    /// Load the scenario and apply command-line overrides.
    pub fn load(&self) -> anyhow::Result<Scenario> {
        let mut scenario = load_scenario(&self.scenario, self.name.as_deref())?;
        let config = &mut scenario.config;
        if let Some(fl) = self.origin_fl {
            config.origin_fl = fl;
        }
        if let Some(fl) = self.target_fl {
            config.target_fl = fl;
        }
        if let Some(mass) = self.mass {
            config.mass_kg = mass;
        }
        if let Some(route) = self.route_nm {
            config.route_length_nm = route;
        }
        if let Some(delta_temp) = self.delta_temp {
            config.delta_temp_k = delta_temp;
        }
        config.validate()?;
        Ok(scenario)
    }
}

pub fn print_summary(summary: &ProfileSummary) {
    println!("Profile            : {}", summary.label);
    println!("Descent distance   : {:.1} nm", summary.descent_distance_nm);
    println!("Descent time       : {:.0} s", summary.descent_time_s);
    println!("Fuel               : {:.1} kg", summary.fuel_kg);
    println!("Average fuel flow  : {:.1} kg/h", summary.average_fuel_flow_kg_h);
    println!("Average gradient   : {:.2} %", summary.average_gradient_pct);
    println!("Alt/distance ratio : {:.1} ft/nm", summary.altitude_distance_ratio_ft_nm);
}

pub fn print_decelerations(segments: &[DecelerationSegment]) {
    if segments.is_empty() {
        println!("No deceleration segments.");
        return;
    }
    println!(
        "{:<12}{:>6}{:>12}{:>12}{:>10}{:>10}{:>10}{:>10}",
        "Trigger", "FL", "CAS before", "CAS after", "Dist nm", "Time s", "Fuel kg", "TAS kt"
    );
    for segment in segments {
        println!(
            "{:<12}{:>6}{:>12.1}{:>12.1}{:>10.1}{:>10.1}{:>10.1}{:>10.1}",
            segment.trigger.to_string(),
            segment.flight_level,
            segment.cas_before_kt,
            segment.cas_after_kt,
            segment.distance_nm,
            segment.time_s,
            segment.fuel_kg,
            segment.tas_kt,
        );
    }
}

pub fn print_trip(title: &str, trip: &TripEstimate) {
    println!("--- {title}: {} ---", trip.schedule);
    println!(
        "Cruise  : {:.1} nm at {:.1} kt GS, {:.1} s",
        trip.cruise_distance_nm, trip.cruise_ground_speed_kt, trip.cruise_time_s
    );
    println!(
        "Descent : {:.1} nm, {:.1} s, {:.1} kg (crossover FL{})",
        trip.profile.summary.descent_distance_nm,
        trip.descent_time_s,
        trip.profile.summary.fuel_kg,
        trip.profile.crossover_fl
    );
    println!("ETA     : {:.1} s", trip.eta_s);
}
