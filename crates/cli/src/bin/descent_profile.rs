use std::path::PathBuf;

use clap::Parser;
use descent_cli::{ScenarioArgs, init_logging, print_decelerations, print_summary};
use descent_planner::output::write_profile_csv;
use descent_planner::trajectory::{SpeedSchedule, compute_descent_profile};

/// Compute the idle descent flown with one speed schedule.
#[derive(Parser, Debug)]
#[command(author, version, about = "Descent profile calculator for a single speed schedule")]
struct Cli {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Descent Mach held above the crossover altitude
    #[arg(long, default_value_t = 0.78)]
    mach: f64,

    /// High-altitude CAS (kt)
    #[arg(long, default_value_t = 280.0)]
    cas: f64,

    /// Intermediate CAS (kt) held below the intermediate flight level
    #[arg(long, requires = "intermediate_fl")]
    intermediate_cas: Option<f64>,

    /// Flight level where the intermediate CAS takes over
    #[arg(long, requires = "intermediate_cas")]
    intermediate_fl: Option<i32>,

    /// Print every sampled point
    #[arg(long, default_value_t = false)]
    points: bool,

    /// Write the descent table CSV here ('-' for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let scenario = cli.scenario.load()?;

    let mut schedule = SpeedSchedule::new(cli.mach, cli.cas);
    if let (Some(cas), Some(fl)) = (cli.intermediate_cas, cli.intermediate_fl) {
        schedule = schedule.with_intermediate(cas, fl);
    }

    let profile = compute_descent_profile(&scenario.aircraft, &scenario.descent_request(), &schedule)?;

    if let Some(path) = &cli.output {
        write_profile_csv(path, &profile)?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    println!("=== Descent Profile ===");
    println!(
        "Scenario : {} ({}, {:.0} kg)",
        scenario.config.name, scenario.config.aircraft, scenario.config.mass_kg
    );
    println!(
        "Descent  : FL{} -> FL{}, crossover FL{}",
        scenario.config.origin_fl, scenario.config.target_fl, profile.crossover_fl
    );
    print_summary(&profile.summary);
    println!();
    print_decelerations(&profile.decelerations);

    if cli.points {
        println!();
        println!(
            "{:>5}{:>16}{:>8}{:>8}{:>8}{:>9}{:>8}{:>9}{:>9}{:>9}",
            "FL", "Mode", "Mach", "CAS", "TAS", "ROD", "Ratio", "Dist", "Time", "Fuel"
        );
        for point in &profile.points {
            println!(
                "{:>5}{:>16}{:>8.3}{:>8.1}{:>8.1}{:>9.0}{:>8.0}{:>9.1}{:>9.0}{:>9.1}{}",
                point.flight_level,
                point.speed_mode,
                point.mach,
                point.cas_kt,
                point.tas_kt,
                point.descent_rate_ft_min,
                point.altitude_distance_ratio_ft_nm,
                point.cumulative_distance_nm,
                point.cumulative_time_s,
                point.cumulative_fuel_kg,
                if point.is_deceleration_point { "  *" } else { "" },
            );
        }
    }

    if let Some(path) = &cli.output {
        println!();
        println!("Descent table written to {}", path.display());
    }
    Ok(())
}
