//! Concurrent load-generation engine: a fixed worker pool hammering one
//! endpoint until a duration or request-cap stop condition fires, with live
//! aggregation of per-attempt outcomes.
mod aggregator;
mod budget;
mod generator;
mod report;
mod types;


pub use generator::{RequestSender, StressRun, run_stress};
pub use report::{LatencyStats, StressStats, compute_stats, percentile_index, report_lines};
pub use types::{Outcome, StressResult, StressSpec};
