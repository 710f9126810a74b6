//! Typed failures of the climate progress engine
//!
//! Only structurally broken inputs are errors. A stage that merely lacks the
//! threshold needed to detect its own completion is NOT an error: it is
//! reported inside a valid `ProgressResult` as `blocked_on_missing_threshold`,
//! and a single missing observation day never aborts a computation.

use chrono::NaiveDate;
use thiserror::Error;

/// Fatal engine failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClimateError {
    // Structural data errors
    #[error("crop has no stages defined")]
    NoStages,

    #[error("stage orders are not contiguous from 1: {detail}")]
    NonContiguousStageOrder { detail: String },

    #[error("stage {order} ('{name}') is internally inconsistent: {reason}")]
    InconsistentStage {
        order: u32,
        name: String,
        reason: String,
    },

    #[error("recorded current stage order {order} does not exist for this crop")]
    UnknownResumeStage { order: u32 },

    // Weather data availability errors
    #[error("weather series is empty")]
    EmptyWeatherSeries,

    #[error(
        "weather series ({series_start} to {series_end}) does not cover the \
         cultivation window starting {window_start}"
    )]
    WindowNotCovered {
        series_start: NaiveDate,
        series_end: NaiveDate,
        window_start: NaiveDate,
    },
}

impl ClimateError {
    /// True for errors caused by an inconsistent crop/stage definition, as
    /// opposed to unavailable weather data
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ClimateError::NoStages
                | ClimateError::NonContiguousStageOrder { .. }
                | ClimateError::InconsistentStage { .. }
                | ClimateError::UnknownResumeStage { .. }
        )
    }
}
