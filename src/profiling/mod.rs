//! Profiling utilities.
//!
//! - `cycles`: DWT cycle counter for per-stage frame timing
//! - `stats`: Per-window averages behind the periodic `PROFILE:` log line

pub mod cycles;
mod stats;

pub use stats::{FrameStats, ProfileSummary};
