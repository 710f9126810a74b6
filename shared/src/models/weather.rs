//! Daily weather observation models
//!
//! A [`WeatherSeries`] is the engine's only source of weather data: an
//! ordered, gapless sequence of days where a day without data is an explicit
//! [`DailyWeather::Missing`] marker. Downstream accumulation can therefore
//! always distinguish "zero" from "unknown".

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One recorded daily weather observation for a field's location
///
/// Individual readings may be absent even on a recorded day (e.g. a station
/// that reports temperatures but not sunshine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub date: NaiveDate,
    pub mean_temperature: Option<Decimal>,
    pub min_temperature: Option<Decimal>,
    pub max_temperature: Option<Decimal>,
    pub sunshine_hours: Option<Decimal>,
    pub precipitation_mm: Option<Decimal>,
}

/// One calendar day in a weather series: either a recorded observation or an
/// explicit missing-day marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DailyWeather {
    Observed(WeatherObservation),
    Missing { date: NaiveDate },
}

impl DailyWeather {
    pub fn date(&self) -> NaiveDate {
        match self {
            DailyWeather::Observed(obs) => obs.date,
            DailyWeather::Missing { date } => *date,
        }
    }

    pub fn observation(&self) -> Option<&WeatherObservation> {
        match self {
            DailyWeather::Observed(obs) => Some(obs),
            DailyWeather::Missing { .. } => None,
        }
    }
}

/// Errors raised when assembling a weather series
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeatherSeriesError {
    #[error("duplicate observation date: {0}")]
    DuplicateDate(NaiveDate),

    #[error("series is not contiguous: expected {expected}, found {found}")]
    NonContiguous {
        expected: NaiveDate,
        found: NaiveDate,
    },
}

/// An ordered daily weather series for one location
///
/// Invariant: dates are strictly increasing and contiguous. Gaps must be
/// represented as [`DailyWeather::Missing`] entries, never silently skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    days: Vec<DailyWeather>,
}

impl WeatherSeries {
    /// Build a series from pre-ordered days, validating the contiguity
    /// invariant
    pub fn new(days: Vec<DailyWeather>) -> Result<Self, WeatherSeriesError> {
        let mut previous: Option<NaiveDate> = None;
        for day in &days {
            if let Some(prev) = previous {
                let expected = next_day(prev);
                if day.date() == prev {
                    return Err(WeatherSeriesError::DuplicateDate(prev));
                }
                if day.date() != expected {
                    return Err(WeatherSeriesError::NonContiguous {
                        expected,
                        found: day.date(),
                    });
                }
            }
            previous = Some(day.date());
        }
        Ok(Self { days })
    }

    /// Build a series from raw observations, sorting by date and filling
    /// calendar gaps with explicit missing markers
    pub fn from_observations(
        mut observations: Vec<WeatherObservation>,
    ) -> Result<Self, WeatherSeriesError> {
        observations.sort_by_key(|obs| obs.date);

        let mut days = Vec::with_capacity(observations.len());
        let mut previous: Option<NaiveDate> = None;
        for obs in observations {
            if let Some(prev) = previous {
                if obs.date == prev {
                    return Err(WeatherSeriesError::DuplicateDate(prev));
                }
                let mut cursor = next_day(prev);
                while cursor < obs.date {
                    days.push(DailyWeather::Missing { date: cursor });
                    cursor = next_day(cursor);
                }
            }
            previous = Some(obs.date);
            days.push(DailyWeather::Observed(obs));
        }
        Ok(Self { days })
    }

    pub fn days(&self) -> &[DailyWeather] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date())
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date())
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    // NaiveDate::MAX is unreachable for real observation dates
    date.succ_opt().unwrap_or(date)
}
