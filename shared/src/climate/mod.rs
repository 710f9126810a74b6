//! Field cultivation climate progress engine
//!
//! Given a planted field cultivation, its crop's staged requirements, and a
//! daily weather series, the engine determines which growth stage the crop is
//! in, how far it has progressed within that stage, and which stress events
//! have occurred. The whole computation is a pure, synchronous reduction over
//! an in-memory series: no I/O, no shared state, and identical inputs always
//! produce identical results (debug trace included).
//!
//! The entry point is [`engine::compute_progress`]; the sibling modules hold
//! the independent per-day reductions it composes.

pub mod degree_days;
pub mod engine;
pub mod error;
pub mod progression;
pub mod stress;
pub mod sunshine;

pub use degree_days::{accumulate_degree_days, CumulativeGddSeries, DailyGdd};
pub use engine::{compute_progress, ClimateProgressInput, ProgressResult, TraceRow};
pub use error::ClimateError;
pub use progression::{ResumeState, StageResolution, StageTraceRow, StageTransition};
pub use stress::{detect_stress_events, StressEvent, StressKind};
pub use sunshine::{accumulate_sunshine, SunshineProgress};
