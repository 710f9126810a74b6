//! Synthetic weather series generation
//!
//! Demo and testing utility only. Produces a deterministic daily series from
//! a seed so the same request always yields the same series. The production
//! compute path never goes through this module; it reads recorded
//! observations from the database.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use shared::models::{DailyWeather, WeatherObservation};

/// Request parameters for a synthetic weather series
#[derive(Debug, Deserialize, Validate)]
pub struct SyntheticSeriesInput {
    /// First date of the generated series
    pub start_date: NaiveDate,

    /// Number of consecutive days to generate
    #[validate(range(min = 1, max = 366, message = "days must be between 1 and 366"))]
    pub days: u32,

    /// Seed for the deterministic generator
    pub seed: u64,

    /// Annual mean temperature the seasonal curve oscillates around
    /// (defaults to 15 degrees C)
    pub mean_annual_temperature: Option<Decimal>,

    /// If set, every Nth day is emitted as a missing-observation marker
    #[validate(range(min = 2, message = "missing_day_interval must be at least 2"))]
    pub missing_day_interval: Option<u32>,
}

/// Linear congruential generator, good enough for demo noise
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        // Avoid the degenerate all-zero state
        Self(seed.wrapping_mul(2862933555777941757).wrapping_add(3037000493))
    }

    /// Next pseudo-random value in [0, 1)
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Generate a deterministic synthetic weather series
pub fn generate_series(input: &SyntheticSeriesInput) -> Vec<DailyWeather> {
    let annual_mean = input
        .mean_annual_temperature
        .and_then(|d| d.to_f64())
        .unwrap_or(15.0);
    let mut rng = Lcg::new(input.seed);

    (0..input.days)
        .map(|i| {
            let date = input.start_date + Duration::days(i64::from(i));

            if let Some(interval) = input.missing_day_interval {
                if (i + 1) % interval == 0 {
                    // Burn the day's draws so missing days do not shift the
                    // values of the days after them
                    for _ in 0..3 {
                        rng.next_unit();
                    }
                    return DailyWeather::Missing { date };
                }
            }

            // Seasonal sine peaking in early August (northern hemisphere)
            let day_of_year = f64::from(date.ordinal());
            let seasonal = 8.0 * (std::f64::consts::TAU * (day_of_year - 110.0) / 365.0).sin();

            let noise = 3.0 * (rng.next_unit() - 0.5);
            let mean = annual_mean + seasonal + noise;
            let spread = rng.next_unit();
            let min = mean - 4.0 - 2.0 * spread;
            let max = mean + 5.0 + 2.0 * spread;

            let sun_draw = rng.next_unit();
            let sunshine = (6.0 + seasonal / 2.0 + 3.0 * (sun_draw - 0.5)).clamp(0.0, 14.0);
            let precipitation = if sun_draw < 0.3 {
                Some(dec(12.0 * (0.3 - sun_draw) / 0.3))
            } else {
                None
            };

            DailyWeather::Observed(WeatherObservation {
                date,
                mean_temperature: Some(dec(mean)),
                min_temperature: Some(dec(min)),
                max_temperature: Some(dec(max)),
                sunshine_hours: Some(dec(sunshine)),
                precipitation_mm: precipitation,
            })
        })
        .collect()
}

fn dec(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(1))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(days: u32, missing_day_interval: Option<u32>) -> SyntheticSeriesInput {
        SyntheticSeriesInput {
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            days,
            seed: 42,
            mean_annual_temperature: None,
            missing_day_interval,
        }
    }

    #[test]
    fn same_seed_yields_identical_series() {
        let a = generate_series(&input(30, None));
        let b = generate_series(&input(30, None));
        assert_eq!(a, b);
    }

    #[test]
    fn series_is_contiguous_and_complete() {
        let series = generate_series(&input(10, None));
        assert_eq!(series.len(), 10);
        for (i, day) in series.iter().enumerate() {
            let expected = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
                + Duration::days(i as i64);
            assert_eq!(day.date(), expected);
            assert!(day.observation().is_some());
        }
    }

    #[test]
    fn missing_interval_emits_markers() {
        let series = generate_series(&input(9, Some(3)));
        for (i, day) in series.iter().enumerate() {
            let should_be_missing = (i + 1) % 3 == 0;
            assert_eq!(day.observation().is_none(), should_be_missing, "day {}", i);
        }
    }

    #[test]
    fn missing_days_do_not_shift_later_values() {
        let full = generate_series(&input(9, None));
        let gapped = generate_series(&input(9, Some(3)));
        for (f, g) in full.iter().zip(gapped.iter()) {
            if g.observation().is_some() {
                assert_eq!(f, g);
            }
        }
    }
}
