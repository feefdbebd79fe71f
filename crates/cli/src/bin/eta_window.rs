use std::path::PathBuf;

use clap::Parser;
use descent_cli::{ScenarioArgs, init_logging, print_trip};
use descent_planner::output::write_bracket_json;
use descent_planner::trajectory::compute_eta_bracket;

/// Print the earliest and latest achievable arrival times for a scenario.
#[derive(Parser, Debug)]
#[command(author, version, about = "ETA window from the fastest and slowest descent schedules")]
struct Cli {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Write the bracket as JSON here ('-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let scenario = cli.scenario.load()?;
    let bracket = compute_eta_bracket(&scenario.aircraft, &scenario.trip_request())?;

    if let Some(path) = &cli.json {
        write_bracket_json(path, &bracket)?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    println!("=== ETA Window ===");
    println!(
        "Scenario : {} ({}, {:.0} kg, {:.1} nm, FL{} -> FL{})",
        scenario.config.name,
        scenario.config.aircraft,
        scenario.config.mass_kg,
        scenario.config.route_length_nm,
        scenario.config.origin_fl,
        scenario.config.target_fl
    );
    if let Some(description) = &scenario.aircraft.aircraft().description {
        println!("Aircraft : {description}");
    }
    print_trip("Fastest", &bracket.fastest);
    print_trip("Slowest", &bracket.slowest);
    println!("ETAmin   : {:.1} s", bracket.eta_min_s());
    println!("ETAmax   : {:.1} s", bracket.eta_max_s());
    println!("Window   : {:.1} s", bracket.window_s());
    Ok(())
}
