//! Heuristic search for descent schedules whose trip ETA meets a required time of arrival.
//!
//! The RTA's relative position inside the ETA bracket selects one band of candidate schedules:
//! early targets try fast Mach/CAS pairs, late targets try slow pairs with lower intermediate
//! steps. Every candidate of the band is evaluated, together with the two canonical schedules,
//! and the ones landing within tolerance are ranked by how close they come.

use std::cmp::Ordering;

use descent_performance::PerformanceOracle;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::schedule::{IntermediateStep, SpeedSchedule};
use crate::trip::{EtaBracket, TripEstimate, TripRequest, assemble_trip, compute_eta_bracket};
use crate::{ConfigurationError, TrajectoryError};

const fn step(cas_kt: f64, flight_level: i32) -> Option<IntermediateStep> {
    Some(IntermediateStep {
        cas_kt,
        flight_level,
    })
}

/// Candidate grid for one slice of the ETA window.
#[derive(Debug)]
pub struct SearchBand {
    /// Exclusive upper bound on the relative position served by this band.
    pub upper_bound: f64,
    /// Descent Mach numbers paired with the high CAS values tried for each.
    pub mach_cas: &'static [(f64, &'static [f64])],
    pub intermediates: &'static [Option<IntermediateStep>],
}

impl SearchBand {
    /// Every Mach × CAS × intermediate combination, duplicates removed.
    ///
    /// A schedule listed twice in a band (band 0 repeats its FL50 step) is evaluated once, so it
    /// can never fill two result slots.
    pub fn schedules(&self) -> Vec<SpeedSchedule> {
        let mut schedules: Vec<SpeedSchedule> = Vec::new();
        for &(mach, cas_values) in self.mach_cas {
            for &cas in cas_values {
                for &intermediate in self.intermediates {
                    let schedule = SpeedSchedule {
                        descent_mach: mach,
                        high_cas_kt: cas,
                        intermediate,
                    };
                    if !schedules.contains(&schedule) {
                        schedules.push(schedule);
                    }
                }
            }
        }
        schedules
    }
}

/// Bands ordered by relative position, fastest first.
pub static SEARCH_BANDS: [SearchBand; 5] = [
    SearchBand {
        upper_bound: 0.2,
        mach_cas: &[
            (0.78, &[290.0, 295.0, 300.0]),
            (0.79, &[295.0, 300.0, 305.0]),
            (0.80, &[300.0, 305.0, 310.0]),
        ],
        intermediates: &[None, step(220.0, 50), step(220.0, 50)],
    },
    SearchBand {
        upper_bound: 0.4,
        mach_cas: &[
            (0.76, &[275.0, 280.0, 285.0]),
            (0.77, &[280.0, 285.0, 290.0, 295.0]),
            (0.78, &[285.0, 290.0, 295.0]),
            (0.79, &[290.0, 295.0, 300.0]),
        ],
        intermediates: &[None, step(220.0, 50), step(220.0, 60)],
    },
    SearchBand {
        upper_bound: 0.6,
        mach_cas: &[
            (0.75, &[265.0, 270.0, 275.0, 280.0]),
            (0.76, &[270.0, 275.0, 280.0]),
            (0.77, &[275.0, 280.0, 285.0]),
        ],
        intermediates: &[None, step(220.0, 50), step(220.0, 60), step(220.0, 80)],
    },
    SearchBand {
        upper_bound: 0.8,
        mach_cas: &[
            (0.74, &[255.0, 260.0, 265.0]),
            (0.75, &[260.0, 265.0, 270.0]),
            (0.76, &[265.0, 270.0, 275.0]),
        ],
        intermediates: &[
            step(220.0, 50),
            step(220.0, 60),
            step(220.0, 80),
            step(220.0, 100),
        ],
    },
    SearchBand {
        upper_bound: f64::INFINITY,
        mach_cas: &[(0.73, &[245.0, 250.0, 255.0]), (0.74, &[250.0, 255.0, 260.0])],
        intermediates: &[
            step(220.0, 60),
            step(220.0, 80),
            step(220.0, 100),
            step(220.0, 120),
            step(220.0, 150),
        ],
    },
];

/// Index of the band serving a relative position in the ETA window.
pub fn band_index(relative_position: f64) -> usize {
    SEARCH_BANDS
        .iter()
        .position(|band| relative_position < band.upper_bound)
        .unwrap_or(SEARCH_BANDS.len() - 1)
}

/// Band schedules followed by the canonical fastest and slowest schedules, in evaluation order.
pub fn candidate_schedules(relative_position: f64) -> Vec<SpeedSchedule> {
    let mut schedules = SEARCH_BANDS[band_index(relative_position)].schedules();
    for baseline in [SpeedSchedule::FASTEST, SpeedSchedule::SLOWEST] {
        if !schedules.contains(&baseline) {
            schedules.push(baseline);
        }
    }
    schedules
}

/// Target and limits of an RTA search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RtaQuery {
    pub target_rta_s: f64,
    pub tolerance_s: f64,
    pub max_results: usize,
    /// Evaluate at most this many candidates, in candidate order.
    pub candidate_budget: Option<usize>,
}

impl RtaQuery {
    pub fn new(target_rta_s: f64, tolerance_s: f64, max_results: usize) -> Self {
        Self {
            target_rta_s,
            tolerance_s,
            max_results,
            candidate_budget: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.tolerance_s < 0.0 {
            return Err(ConfigurationError::NegativeTolerance(self.tolerance_s));
        }
        if self.max_results == 0 {
            return Err(ConfigurationError::NonPositive {
                quantity: "max results",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Why an RTA cannot be met by any schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Error)]
pub enum InfeasibleRta {
    #[error("RTA {rta_s:.1} s is earlier than ETAmin {eta_min_s:.1} s minus {tolerance_s:.1} s tolerance")]
    BeforeWindow {
        rta_s: f64,
        eta_min_s: f64,
        tolerance_s: f64,
    },
    #[error("RTA {rta_s:.1} s is later than ETAmax {eta_max_s:.1} s plus {tolerance_s:.1} s tolerance")]
    AfterWindow {
        rta_s: f64,
        eta_max_s: f64,
        tolerance_s: f64,
    },
}

/// A schedule whose ETA lands within tolerance of the RTA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    /// Position in evaluation order; breaks ties between equal differences.
    pub candidate_index: usize,
    pub label: String,
    pub eta_s: f64,
    pub difference_s: f64,
    pub trip: TripEstimate,
}

/// Everything an RTA search produced, including diagnostics when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RtaSearchReport {
    pub target_rta_s: f64,
    pub tolerance_s: f64,
    pub bracket: EtaBracket,
    pub relative_position: Option<f64>,
    pub band_index: Option<usize>,
    pub evaluated: usize,
    pub failed: usize,
    pub closest_eta_s: Option<f64>,
    pub infeasible: Option<InfeasibleRta>,
    pub candidates: Vec<MatchCandidate>,
}

impl RtaSearchReport {
    pub fn best(&self) -> Option<&MatchCandidate> {
        self.candidates.first()
    }

    pub fn is_feasible(&self) -> bool {
        self.infeasible.is_none()
    }

    fn rejected(query: &RtaQuery, bracket: EtaBracket, reason: InfeasibleRta) -> Self {
        Self {
            target_rta_s: query.target_rta_s,
            tolerance_s: query.tolerance_s,
            bracket,
            relative_position: None,
            band_index: None,
            evaluated: 0,
            failed: 0,
            closest_eta_s: None,
            infeasible: Some(reason),
            candidates: Vec::new(),
        }
    }
}

fn feasibility(bracket: &EtaBracket, query: &RtaQuery) -> Option<InfeasibleRta> {
    let (rta_s, tolerance_s) = (query.target_rta_s, query.tolerance_s);
    if rta_s < bracket.eta_min_s() - tolerance_s {
        Some(InfeasibleRta::BeforeWindow {
            rta_s,
            eta_min_s: bracket.eta_min_s(),
            tolerance_s,
        })
    } else if rta_s > bracket.eta_max_s() + tolerance_s {
        Some(InfeasibleRta::AfterWindow {
            rta_s,
            eta_max_s: bracket.eta_max_s(),
            tolerance_s,
        })
    } else {
        None
    }
}

/// Find up to `max_results` schedules whose trip ETA is within tolerance of the RTA.
///
/// Bracket failures and invalid queries are returned as errors. A candidate that fails to
/// evaluate is logged and left out; the rest of the search carries on.
pub fn find_profiles_for_rta<O>(
    oracle: &O,
    request: &TripRequest,
    query: &RtaQuery,
) -> Result<RtaSearchReport, TrajectoryError>
where
    O: PerformanceOracle + ?Sized,
{
    query.validate()?;
    let bracket = compute_eta_bracket(oracle, request)?;
    if let Some(reason) = feasibility(&bracket, query) {
        info!(%reason, "RTA outside achievable window");
        return Ok(RtaSearchReport::rejected(query, bracket, reason));
    }

    let position = bracket.relative_position(query.target_rta_s);
    let band = band_index(position);
    let mut schedules = candidate_schedules(position);
    if let Some(budget) = query.candidate_budget {
        schedules.truncate(budget);
    }

    let outcomes: Vec<Result<TripEstimate, TrajectoryError>> = schedules
        .par_iter()
        .map(|schedule| assemble_trip(oracle, request, schedule))
        .collect();

    let mut failed = 0;
    let mut closest: Option<(f64, f64)> = None;
    let mut candidates = Vec::new();
    for (index, (schedule, outcome)) in schedules.iter().zip(outcomes).enumerate() {
        let trip = match outcome {
            Ok(trip) => trip,
            Err(err) => {
                warn!(candidate = %schedule, error = %err, "candidate evaluation failed, skipping");
                failed += 1;
                continue;
            }
        };
        let difference = (trip.eta_s - query.target_rta_s).abs();
        if closest.is_none_or(|(best, _)| difference < best) {
            closest = Some((difference, trip.eta_s));
        }
        if difference <= query.tolerance_s {
            candidates.push(MatchCandidate {
                candidate_index: index,
                label: schedule.to_string(),
                eta_s: trip.eta_s,
                difference_s: difference,
                trip,
            });
        }
    }

    candidates.sort_by(|a, b| {
        a.difference_s
            .partial_cmp(&b.difference_s)
            .unwrap_or(Ordering::Equal)
            .then(a.candidate_index.cmp(&b.candidate_index))
    });
    candidates.truncate(query.max_results);

    info!(
        rta_s = query.target_rta_s,
        position,
        band,
        evaluated = schedules.len(),
        failed,
        matches = candidates.len(),
        "RTA search finished"
    );

    Ok(RtaSearchReport {
        target_rta_s: query.target_rta_s,
        tolerance_s: query.tolerance_s,
        bracket,
        relative_position: Some(position),
        band_index: Some(band),
        evaluated: schedules.len(),
        failed,
        closest_eta_s: closest.map(|(_, eta)| eta),
        infeasible: None,
        candidates,
    })
}
