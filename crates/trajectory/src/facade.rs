//! Re-exported APIs for consumers of the trajectory crate.

pub use crate::deceleration::{DecelerationSegment, DecelerationTrigger};
pub use crate::profile::{DescentProfile, DescentRequest, ProfileSummary, compute_descent_profile};
pub use crate::sampler::DescentPoint;
pub use crate::schedule::{IntermediateStep, SpeedSchedule};
pub use crate::search::{
    InfeasibleRta, MatchCandidate, RtaQuery, RtaSearchReport, find_profiles_for_rta,
};
pub use crate::trip::{EtaBracket, TripEstimate, TripRequest, assemble_trip, compute_eta_bracket};
pub use descent_performance::{PerformanceError, PerformanceOracle};
