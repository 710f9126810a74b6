//! Daily stress event detection
//!
//! Each check is evaluated independently and only when its threshold is
//! configured for the stage; a check whose observation field is missing that
//! day is skipped, never defaulted. Several events may fire on the same day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyWeather, TemperatureRequirement};

/// Kinds of weather stress, in fixed severity order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressKind {
    Frost,
    SterilityRisk,
    HeatStress,
    ColdStress,
}

impl StressKind {
    /// Severity rank for same-day ordering (lower is more severe)
    pub fn severity_rank(&self) -> u8 {
        match self {
            StressKind::Frost => 0,
            StressKind::SterilityRisk => 1,
            StressKind::HeatStress => 2,
            StressKind::ColdStress => 3,
        }
    }
}

impl std::fmt::Display for StressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressKind::Frost => write!(f, "frost"),
            StressKind::SterilityRisk => write!(f, "sterility_risk"),
            StressKind::HeatStress => write!(f, "heat_stress"),
            StressKind::ColdStress => write!(f, "cold_stress"),
        }
    }
}

/// A day on which an observed value crossed a stage threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressEvent {
    pub date: NaiveDate,
    pub kind: StressKind,
    pub observed_value: Decimal,
    pub threshold: Decimal,
}

/// Detect stress events over a window against one stage's temperature
/// requirement
///
/// Checks per day: frost (`min <= frost_threshold`, boundary inclusive),
/// sterility risk (`max >= sterility_risk_threshold`), heat stress
/// (`mean >= high_stress_threshold`), cold stress
/// (`mean <= low_stress_threshold`). Output is chronological; same-day ties
/// follow the fixed severity order frost > sterility_risk > heat_stress >
/// cold_stress.
pub fn detect_stress_events(
    days: &[DailyWeather],
    requirement: Option<&TemperatureRequirement>,
) -> Vec<StressEvent> {
    let Some(req) = requirement else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for day in days {
        let Some(obs) = day.observation() else {
            continue;
        };

        if let (Some(min), Some(threshold)) = (obs.min_temperature, req.frost_threshold) {
            if min <= threshold {
                events.push(StressEvent {
                    date: obs.date,
                    kind: StressKind::Frost,
                    observed_value: min,
                    threshold,
                });
            }
        }
        if let (Some(max), Some(threshold)) = (obs.max_temperature, req.sterility_risk_threshold) {
            if max >= threshold {
                events.push(StressEvent {
                    date: obs.date,
                    kind: StressKind::SterilityRisk,
                    observed_value: max,
                    threshold,
                });
            }
        }
        if let (Some(mean), Some(threshold)) = (obs.mean_temperature, req.high_stress_threshold) {
            if mean >= threshold {
                events.push(StressEvent {
                    date: obs.date,
                    kind: StressKind::HeatStress,
                    observed_value: mean,
                    threshold,
                });
            }
        }
        if let (Some(mean), Some(threshold)) = (obs.mean_temperature, req.low_stress_threshold) {
            if mean <= threshold {
                events.push(StressEvent {
                    date: obs.date,
                    kind: StressKind::ColdStress,
                    observed_value: mean,
                    threshold,
                });
            }
        }
    }

    events
}
