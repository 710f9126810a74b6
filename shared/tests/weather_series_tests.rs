//! Weather series invariant tests
//!
//! The series contiguity invariant underpins every downstream reduction: a
//! gap must always surface as an explicit missing marker.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use shared::models::{DailyWeather, WeatherObservation, WeatherSeries, WeatherSeriesError};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
}

fn observation(day: u32) -> WeatherObservation {
    WeatherObservation {
        date: date(day),
        mean_temperature: None,
        min_temperature: None,
        max_temperature: None,
        sunshine_hours: None,
        precipitation_mm: None,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_from_observations_fills_gaps() {
        let series =
            WeatherSeries::from_observations(vec![observation(1), observation(2), observation(5)])
                .unwrap();

        assert_eq!(series.len(), 5);
        assert!(series.days()[2].observation().is_none());
        assert!(series.days()[3].observation().is_none());
        assert_eq!(series.days()[2].date(), date(3));
        assert_eq!(series.first_date(), Some(date(1)));
        assert_eq!(series.last_date(), Some(date(5)));
    }

    #[test]
    fn test_from_observations_sorts_by_date() {
        let series =
            WeatherSeries::from_observations(vec![observation(3), observation(1), observation(2)])
                .unwrap();

        let dates: Vec<NaiveDate> = series.days().iter().map(|d| d.date()).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let err = WeatherSeries::from_observations(vec![observation(1), observation(1)])
            .unwrap_err();
        assert_eq!(err, WeatherSeriesError::DuplicateDate(date(1)));
    }

    #[test]
    fn test_new_rejects_non_contiguous_days() {
        let days = vec![
            DailyWeather::Observed(observation(1)),
            DailyWeather::Observed(observation(3)),
        ];

        let err = WeatherSeries::new(days).unwrap_err();
        assert_eq!(
            err,
            WeatherSeriesError::NonContiguous {
                expected: date(2),
                found: date(3),
            }
        );
    }

    #[test]
    fn test_new_accepts_explicit_missing_markers() {
        let days = vec![
            DailyWeather::Observed(observation(1)),
            DailyWeather::Missing { date: date(2) },
            DailyWeather::Observed(observation(3)),
        ];

        let series = WeatherSeries::new(days).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = WeatherSeries::new(vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert_eq!(series.last_date(), None);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Strategy for sets of distinct day offsets within one year
    fn offsets_strategy() -> impl Strategy<Value = BTreeSet<i64>> {
        prop::collection::btree_set(0i64..365, 1..60)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A series built from any distinct observation dates is contiguous
        /// and spans exactly first..=last
        #[test]
        fn prop_from_observations_is_contiguous(offsets in offsets_strategy()) {
            let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
            let observations: Vec<WeatherObservation> = offsets
                .iter()
                .map(|offset| WeatherObservation {
                    date: start + Duration::days(*offset),
                    mean_temperature: None,
                    min_temperature: None,
                    max_temperature: None,
                    sunshine_hours: None,
                    precipitation_mm: None,
                })
                .collect();

            let series = WeatherSeries::from_observations(observations).unwrap();

            let first = series.first_date().unwrap();
            let last = series.last_date().unwrap();
            let span = (last - first).num_days() as usize + 1;
            prop_assert_eq!(series.len(), span);
            for (i, day) in series.days().iter().enumerate() {
                prop_assert_eq!(day.date(), first + Duration::days(i as i64));
            }

            // Observed days are exactly the input dates
            let observed = series
                .days()
                .iter()
                .filter(|d| d.observation().is_some())
                .count();
            prop_assert_eq!(observed, offsets.len());
        }
    }
}
