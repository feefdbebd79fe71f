use std::path::PathBuf;

use clap::Parser;
use descent_cli::{ScenarioArgs, init_logging, print_decelerations, print_summary, print_trip};
use descent_planner::output::{write_profile_csv, write_search_json};
use descent_planner::trajectory::find_profiles_for_rta;

/// Search descent schedules whose trip time meets a required time of arrival.
#[derive(Parser, Debug)]
#[command(author, version, about = "RTA-matching descent schedule search")]
struct Cli {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Required time of arrival, seconds from now
    #[arg(long)]
    rta: f64,

    /// Acceptance tolerance in seconds (defaults to the scenario's)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Number of ranked schedules to keep (defaults to the scenario's)
    #[arg(long)]
    max_results: Option<usize>,

    /// Evaluate at most this many candidate schedules
    #[arg(long)]
    budget: Option<usize>,

    /// Write the full search report as JSON here ('-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the best profile's descent table CSV here
    #[arg(long)]
    best_csv: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let scenario = cli.scenario.load()?;

    let mut query = scenario.rta_query(cli.rta);
    if let Some(tolerance) = cli.tolerance {
        query.tolerance_s = tolerance;
    }
    if let Some(max_results) = cli.max_results {
        query.max_results = max_results;
    }
    query.candidate_budget = cli.budget;

    let report = find_profiles_for_rta(&scenario.aircraft, &scenario.trip_request(), &query)?;

    if let Some(path) = &cli.json {
        write_search_json(path, &report)?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }
    if let (Some(path), Some(best)) = (&cli.best_csv, report.best()) {
        write_profile_csv(path, &best.trip.profile)?;
    }

    println!("=== RTA Search ===");
    println!(
        "RTA      : {:.1} s (tolerance {:.1} s)",
        report.target_rta_s, report.tolerance_s
    );
    println!(
        "Window   : ETAmin {:.1} s, ETAmax {:.1} s",
        report.bracket.eta_min_s(),
        report.bracket.eta_max_s()
    );

    if let Some(reason) = &report.infeasible {
        println!("Infeasible: {reason}");
        return Ok(());
    }
    if let Some(position) = report.relative_position {
        println!(
            "Position : {:.2} in window (band {})",
            position,
            report.band_index.unwrap_or_default()
        );
    }
    println!(
        "Evaluated: {} candidates, {} failed",
        report.evaluated, report.failed
    );

    let Some(best) = report.best() else {
        match report.closest_eta_s {
            Some(eta) => println!(
                "No schedule within tolerance; closest ETA {:.1} s ({:+.1} s)",
                eta,
                eta - report.target_rta_s
            ),
            None => println!("No schedule within tolerance."),
        }
        return Ok(());
    };

    println!();
    println!("{:<4}{:<28}{:>10}{:>10}", "#", "Schedule", "ETA s", "Diff s");
    for (rank, candidate) in report.candidates.iter().enumerate() {
        println!(
            "{:<4}{:<28}{:>10.1}{:>10.1}",
            rank + 1,
            candidate.label,
            candidate.eta_s,
            candidate.difference_s
        );
    }

    println!();
    print_trip("Best", &best.trip);
    print_summary(&best.trip.profile.summary);
    println!();
    print_decelerations(&best.trip.profile.decelerations);
    if let Some(path) = &cli.best_csv {
        println!();
        println!("Best descent table written to {}", path.display());
    }
    Ok(())
}
