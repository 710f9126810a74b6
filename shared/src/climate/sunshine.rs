//! Cumulative sunshine tracking
//!
//! Sunshine hours are summed from the start of the current stage. Days with
//! no sunshine reading contribute zero but are counted separately as
//! `missing_days`, so a deficit is never misreported as satisfied just
//! because data never arrived. Days with genuinely no sunshine record an
//! explicit zero instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyWeather, SunshineRequirement};

/// Sunshine accumulation for the current stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunshineProgress {
    pub cumulative_hours: Decimal,
    /// `max(0, minimum - cumulative)`; only reported when a minimum is
    /// configured
    pub deficit_hours: Option<Decimal>,
    /// Only reported when a target is configured
    pub on_target: Option<bool>,
    pub missing_days: usize,
}

/// Accumulate sunshine hours over a window against one stage's sunshine
/// requirement
pub fn accumulate_sunshine(
    days: &[DailyWeather],
    requirement: Option<&SunshineRequirement>,
) -> SunshineProgress {
    let mut cumulative = Decimal::ZERO;
    let mut missing_days = 0usize;

    for day in days {
        match day.observation().and_then(|obs| obs.sunshine_hours) {
            Some(hours) => cumulative += hours,
            None => missing_days += 1,
        }
    }

    let deficit_hours = requirement
        .and_then(|r| r.minimum_sunshine_hours)
        .map(|minimum| (minimum - cumulative).max(Decimal::ZERO));
    let on_target = requirement
        .and_then(|r| r.target_sunshine_hours)
        .map(|target| cumulative >= target);

    SunshineProgress {
        cumulative_hours: cumulative,
        deficit_hours,
        on_target,
        missing_days,
    }
}
