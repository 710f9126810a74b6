//! Growing-degree-day accumulation tests
//!
//! Covers the daily GDD formula, the effective-temperature cap, and the
//! handling of not-computable days (missing observations, missing mean,
//! missing base temperature).

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::climate::accumulate_degree_days;
use shared::models::{DailyWeather, TemperatureRequirement, WeatherObservation};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
}

fn observed(day: u32, mean: Option<&str>) -> DailyWeather {
    DailyWeather::Observed(WeatherObservation {
        date: date(day),
        mean_temperature: mean.map(dec),
        min_temperature: None,
        max_temperature: None,
        sunshine_hours: None,
        precipitation_mm: None,
    })
}

fn requirement(base: &str) -> TemperatureRequirement {
    TemperatureRequirement {
        base_temperature: Some(dec(base)),
        ..Default::default()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// N days at a constant mean accumulate exactly N * (mean - base)
    #[test]
    fn test_constant_mean_accumulation() {
        let days: Vec<DailyWeather> = (1..=10).map(|d| observed(d, Some("20.0"))).collect();
        let req = requirement("10.0");

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.total, dec("100.0"));
        assert_eq!(series.not_computable_days, 0);
        for (i, row) in series.days.iter().enumerate() {
            assert_eq!(row.daily_gdd, Some(dec("10.0")));
            assert_eq!(row.cumulative_gdd, dec("10.0") * Decimal::from(i as u32 + 1));
        }
    }

    /// A mean below the base contributes zero, never a negative value
    #[test]
    fn test_mean_below_base_contributes_zero() {
        let days = vec![observed(1, Some("5.0"))];
        let req = requirement("10.0");

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.days[0].daily_gdd, Some(dec("0.0")));
        assert_eq!(series.days[0].effective_temperature, Some(dec("10.0")));
        assert_eq!(series.total, dec("0.0"));
    }

    /// The effective temperature is capped at max_temperature
    #[test]
    fn test_max_temperature_caps_effective() {
        let days = vec![observed(1, Some("40.0"))];
        let req = TemperatureRequirement {
            base_temperature: Some(dec("10.0")),
            max_temperature: Some(dec("30.0")),
            ..Default::default()
        };

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.days[0].effective_temperature, Some(dec("30.0")));
        assert_eq!(series.days[0].daily_gdd, Some(dec("20.0")));
    }

    /// With no max_temperature the cap falls back to optimal_max
    #[test]
    fn test_cap_falls_back_to_optimal_max() {
        let days = vec![observed(1, Some("40.0"))];
        let req = TemperatureRequirement {
            base_temperature: Some(dec("10.0")),
            optimal_max: Some(dec("25.0")),
            ..Default::default()
        };

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.days[0].effective_temperature, Some(dec("25.0")));
        assert_eq!(series.days[0].daily_gdd, Some(dec("15.0")));
    }

    /// With neither cap configured the mean passes through uncapped
    #[test]
    fn test_no_cap_passes_mean_through() {
        let days = vec![observed(1, Some("40.0"))];
        let req = requirement("10.0");

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.days[0].effective_temperature, Some(dec("40.0")));
        assert_eq!(series.days[0].daily_gdd, Some(dec("30.0")));
    }

    /// A cap configured below the base clamps the effective temperature to
    /// the base, contributing zero
    #[test]
    fn test_cap_below_base_clamps_to_base() {
        let days = vec![observed(1, Some("20.0"))];
        let req = TemperatureRequirement {
            base_temperature: Some(dec("10.0")),
            max_temperature: Some(dec("5.0")),
            ..Default::default()
        };

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.days[0].effective_temperature, Some(dec("10.0")));
        assert_eq!(series.days[0].daily_gdd, Some(dec("0.0")));
    }

    /// Days without a recorded observation are excluded from the cumulative
    /// sum but still produce a trace row
    #[test]
    fn test_missing_days_excluded_from_cumulative() {
        let days = vec![
            observed(1, Some("20.0")),
            observed(2, Some("20.0")),
            DailyWeather::Missing { date: date(3) },
            DailyWeather::Missing { date: date(4) },
            observed(5, Some("20.0")),
        ];
        let req = requirement("10.0");

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.days.len(), 5);
        assert_eq!(series.total, dec("30.0"));
        assert_eq!(series.not_computable_days, 2);
        // The cumulative sum is carried unchanged across the gap
        assert_eq!(series.days[2].daily_gdd, None);
        assert_eq!(series.days[2].cumulative_gdd, dec("20.0"));
        assert_eq!(series.days[3].cumulative_gdd, dec("20.0"));
        assert_eq!(series.days[4].cumulative_gdd, dec("30.0"));
        assert_eq!(
            series.days[2].note.as_deref(),
            Some("no observation recorded for this day")
        );
    }

    /// An observation without a mean temperature is not computable
    #[test]
    fn test_missing_mean_not_computable() {
        let days = vec![observed(1, None)];
        let req = requirement("10.0");

        let series = accumulate_degree_days(&days, Some(&req));

        assert_eq!(series.days[0].daily_gdd, None);
        assert_eq!(series.not_computable_days, 1);
        assert_eq!(
            series.days[0].note.as_deref(),
            Some("mean temperature not recorded")
        );
    }

    /// Without a configured base temperature no day is computable
    #[test]
    fn test_missing_base_not_computable() {
        let days = vec![observed(1, Some("20.0")), observed(2, Some("22.0"))];

        let series = accumulate_degree_days(&days, None);

        assert_eq!(series.total, Decimal::ZERO);
        assert_eq!(series.not_computable_days, 2);
        for row in &series.days {
            assert_eq!(
                row.note.as_deref(),
                Some("base temperature not configured for this stage")
            );
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for daily mean temperatures in a plausible range (-20.0 to 45.0)
    fn mean_strategy() -> impl Strategy<Value = Decimal> {
        (-200i64..=450i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Daily GDD is never negative and the total equals the sum of
        /// the daily contributions
        #[test]
        fn prop_total_is_sum_of_nonnegative_dailies(
            means in prop::collection::vec(mean_strategy(), 1..60)
        ) {
            let days: Vec<DailyWeather> = means
                .iter()
                .enumerate()
                .map(|(i, mean)| DailyWeather::Observed(WeatherObservation {
                    date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                        + chrono::Duration::days(i as i64),
                    mean_temperature: Some(*mean),
                    min_temperature: None,
                    max_temperature: None,
                    sunshine_hours: None,
                    precipitation_mm: None,
                }))
                .collect();
            let req = requirement("10.0");

            let series = accumulate_degree_days(&days, Some(&req));

            let mut sum = Decimal::ZERO;
            for row in &series.days {
                let gdd = row.daily_gdd.unwrap();
                prop_assert!(gdd >= Decimal::ZERO);
                sum += gdd;
                prop_assert_eq!(row.cumulative_gdd, sum);
            }
            prop_assert_eq!(series.total, sum);
        }

        /// A configured cap never increases the total
        #[test]
        fn prop_cap_never_increases_total(
            means in prop::collection::vec(mean_strategy(), 1..60)
        ) {
            let days: Vec<DailyWeather> = means
                .iter()
                .enumerate()
                .map(|(i, mean)| DailyWeather::Observed(WeatherObservation {
                    date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                        + chrono::Duration::days(i as i64),
                    mean_temperature: Some(*mean),
                    min_temperature: None,
                    max_temperature: None,
                    sunshine_hours: None,
                    precipitation_mm: None,
                }))
                .collect();

            let uncapped = requirement("10.0");
            let capped = TemperatureRequirement {
                base_temperature: Some(dec("10.0")),
                max_temperature: Some(dec("30.0")),
                ..Default::default()
            };

            let without_cap = accumulate_degree_days(&days, Some(&uncapped));
            let with_cap = accumulate_degree_days(&days, Some(&capped));

            prop_assert!(with_cap.total <= without_cap.total);
        }

        /// Every day yields exactly one row; computable and not-computable
        /// rows partition the window
        #[test]
        fn prop_rows_partition_window(
            recorded in prop::collection::vec(prop::bool::ANY, 1..60)
        ) {
            let days: Vec<DailyWeather> = recorded
                .iter()
                .enumerate()
                .map(|(i, has_data)| {
                    let d = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                        + chrono::Duration::days(i as i64);
                    if *has_data {
                        DailyWeather::Observed(WeatherObservation {
                            date: d,
                            mean_temperature: Some(dec("15.0")),
                            min_temperature: None,
                            max_temperature: None,
                            sunshine_hours: None,
                            precipitation_mm: None,
                        })
                    } else {
                        DailyWeather::Missing { date: d }
                    }
                })
                .collect();
            let req = requirement("10.0");

            let series = accumulate_degree_days(&days, Some(&req));

            prop_assert_eq!(series.days.len(), days.len());
            let computable = series.days.iter().filter(|r| r.daily_gdd.is_some()).count();
            prop_assert_eq!(computable + series.not_computable_days, days.len());
        }
    }
}
