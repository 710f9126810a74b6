//! Growing-degree-day accumulation
//!
//! Daily GDD is the heat accumulated above a stage-specific base temperature,
//! optionally capped at `max_temperature` (falling back to `optimal_max`).
//! A day whose GDD cannot be computed (missing observation, missing mean
//! temperature, or no configured base temperature) is reported as
//! "not computable" and excluded from the cumulative sum. It is never
//! defaulted to zero: a zero contribution and an unknown contribution must
//! stay distinguishable, or a stage could be declared complete on guesswork.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyWeather, TemperatureRequirement};

pub(crate) const NOTE_MISSING_OBSERVATION: &str = "no observation recorded for this day";
pub(crate) const NOTE_MISSING_MEAN: &str = "mean temperature not recorded";
pub(crate) const NOTE_MISSING_BASE: &str = "base temperature not configured for this stage";

/// One day's degree-day outcome
///
/// `daily_gdd` is `None` when the day is not computable; `cumulative_gdd`
/// then carries the running sum unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGdd {
    pub date: NaiveDate,
    pub effective_temperature: Option<Decimal>,
    pub daily_gdd: Option<Decimal>,
    pub cumulative_gdd: Decimal,
    pub note: Option<String>,
}

/// Cumulative degree-day series over one stage attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeGddSeries {
    pub days: Vec<DailyGdd>,
    pub total: Decimal,
    pub not_computable_days: usize,
}

/// Outcome of the single-day GDD computation
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DailyOutcome {
    Computed {
        effective_temperature: Decimal,
        gdd: Decimal,
    },
    NotComputable {
        note: &'static str,
    },
}

/// Compute one day's effective temperature and GDD contribution
///
/// Effective temperature is the mean clamped to `[base, cap]` where the cap
/// is `max_temperature`, falling back to `optimal_max`; with no cap
/// configured it is `max(mean, base)`. Daily GDD is `effective - base`,
/// non-negative by construction.
pub(crate) fn daily_degree_day(
    day: &DailyWeather,
    requirement: Option<&TemperatureRequirement>,
) -> DailyOutcome {
    let Some(observation) = day.observation() else {
        return DailyOutcome::NotComputable {
            note: NOTE_MISSING_OBSERVATION,
        };
    };
    let Some(mean) = observation.mean_temperature else {
        return DailyOutcome::NotComputable {
            note: NOTE_MISSING_MEAN,
        };
    };
    let Some(base) = requirement.and_then(|r| r.base_temperature) else {
        return DailyOutcome::NotComputable {
            note: NOTE_MISSING_BASE,
        };
    };

    let cap = requirement.and_then(|r| r.max_temperature.or(r.optimal_max));
    let capped = match cap {
        // A cap below the base cannot reduce the effective temperature
        // further than the base itself.
        Some(cap) => mean.min(cap.max(base)),
        None => mean,
    };
    let effective = capped.max(base);

    DailyOutcome::Computed {
        effective_temperature: effective,
        gdd: effective - base,
    }
}

/// Accumulate daily and cumulative GDD over a window against one stage's
/// temperature requirement
///
/// The cumulative sum starts at zero on the window's first day. The date
/// pointer always advances: not-computable days still produce a row so the
/// ordering of the series is preserved.
pub fn accumulate_degree_days(
    days: &[DailyWeather],
    requirement: Option<&TemperatureRequirement>,
) -> CumulativeGddSeries {
    let mut rows = Vec::with_capacity(days.len());
    let mut cumulative = Decimal::ZERO;
    let mut not_computable = 0usize;

    for day in days {
        match daily_degree_day(day, requirement) {
            DailyOutcome::Computed {
                effective_temperature,
                gdd,
            } => {
                cumulative += gdd;
                rows.push(DailyGdd {
                    date: day.date(),
                    effective_temperature: Some(effective_temperature),
                    daily_gdd: Some(gdd),
                    cumulative_gdd: cumulative,
                    note: None,
                });
            }
            DailyOutcome::NotComputable { note } => {
                not_computable += 1;
                rows.push(DailyGdd {
                    date: day.date(),
                    effective_temperature: None,
                    daily_gdd: None,
                    cumulative_gdd: cumulative,
                    note: Some(note.to_string()),
                });
            }
        }
    }

    CumulativeGddSeries {
        days: rows,
        total: cumulative,
        not_computable_days: not_computable,
    }
}
