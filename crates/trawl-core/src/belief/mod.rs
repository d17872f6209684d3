//! Depth belief tracking for the shoal currently being followed.
//!
//! - `hard`: the candidate-set state machine (`DepthBelief`) and its update rules.
//! - `telemetry`: coarse metrics derived from a belief for logging and summaries.

mod hard;
pub mod telemetry;

pub use hard::{BeliefChange, DepthBelief, NetOffset};
