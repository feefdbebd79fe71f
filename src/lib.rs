//! Descent trajectory synthesis and RTA-matching search.
//!
//! The workspace crates are re-exported here so front-ends depend on a single library:
//! the performance oracle, the trajectory engine, configuration loaders and exporters.
//! `scenario` ties a scenario file to a ready-to-run aircraft model.

pub mod output;
pub mod scenario;

pub use descent_config as config;
pub use descent_core as primitives;
pub use descent_export as export;
pub use descent_performance as performance;
pub use descent_trajectory as trajectory;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
