//! Climate progress service
//!
//! Loads the field cultivation, its crop's staged requirements, and the
//! field's daily weather observations, then invokes the pure engine in the
//! `shared` crate. The service never fabricates data for the engine: an empty
//! weather load is handed over as an empty series and surfaces as the
//! engine's own typed error.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::climate::{compute_progress, ClimateProgressInput, ProgressResult, ResumeState};
use shared::models::{
    CropStage, NutrientRequirement, SunshineRequirement, TemperatureRequirement,
    ThermalRequirement, WeatherObservation, WeatherSeries,
};
use shared::types::DateRange;

/// Service computing climate progress for field cultivations
#[derive(Clone)]
pub struct ClimateProgressService {
    db: PgPool,
}

/// Field cultivation row joined with its crop
#[derive(Debug, FromRow)]
struct CultivationRow {
    id: Uuid,
    field_id: Uuid,
    crop_id: Uuid,
    crop_name: String,
    planted_on: NaiveDate,
    current_stage_order: Option<i32>,
    stage_entered_on: Option<NaiveDate>,
    stage_gdd_carryover: Option<Decimal>,
}

/// Crop stage row with its requirement sub-objects flattened via LEFT JOINs
///
/// A requirement group is present when its id column is non-null.
#[derive(Debug, FromRow)]
struct StageRow {
    id: Uuid,
    name: String,
    stage_order: i32,
    temperature_id: Option<Uuid>,
    base_temperature: Option<Decimal>,
    optimal_min: Option<Decimal>,
    optimal_max: Option<Decimal>,
    low_stress_threshold: Option<Decimal>,
    high_stress_threshold: Option<Decimal>,
    frost_threshold: Option<Decimal>,
    sterility_risk_threshold: Option<Decimal>,
    max_temperature: Option<Decimal>,
    required_gdd: Option<Decimal>,
    sunshine_id: Option<Uuid>,
    minimum_sunshine_hours: Option<Decimal>,
    target_sunshine_hours: Option<Decimal>,
    nutrient_id: Option<Uuid>,
    daily_nitrogen: Option<Decimal>,
    daily_phosphorus: Option<Decimal>,
    daily_potassium: Option<Decimal>,
    region: Option<String>,
}

impl From<StageRow> for CropStage {
    fn from(row: StageRow) -> Self {
        let temperature = row.temperature_id.map(|_| TemperatureRequirement {
            base_temperature: row.base_temperature,
            optimal_min: row.optimal_min,
            optimal_max: row.optimal_max,
            low_stress_threshold: row.low_stress_threshold,
            high_stress_threshold: row.high_stress_threshold,
            frost_threshold: row.frost_threshold,
            sterility_risk_threshold: row.sterility_risk_threshold,
            max_temperature: row.max_temperature,
        });
        let thermal = row
            .required_gdd
            .map(|required_gdd| ThermalRequirement { required_gdd });
        let sunshine = row.sunshine_id.map(|_| SunshineRequirement {
            minimum_sunshine_hours: row.minimum_sunshine_hours,
            target_sunshine_hours: row.target_sunshine_hours,
        });
        let nutrients = row.nutrient_id.map(|_| NutrientRequirement {
            daily_nitrogen: row.daily_nitrogen.unwrap_or_default(),
            daily_phosphorus: row.daily_phosphorus.unwrap_or_default(),
            daily_potassium: row.daily_potassium.unwrap_or_default(),
            region: row.region.clone(),
        });

        CropStage {
            id: row.id,
            name: row.name,
            // An out-of-range order surfaces as a structural error in the
            // engine's stage validation rather than being masked here.
            order: u32::try_from(row.stage_order).unwrap_or(0),
            temperature,
            thermal,
            sunshine,
            nutrients,
        }
    }
}

/// Daily weather observation row
#[derive(Debug, FromRow)]
struct WeatherRow {
    observed_on: NaiveDate,
    mean_temperature: Option<Decimal>,
    min_temperature: Option<Decimal>,
    max_temperature: Option<Decimal>,
    sunshine_hours: Option<Decimal>,
    precipitation_mm: Option<Decimal>,
}

impl From<WeatherRow> for WeatherObservation {
    fn from(row: WeatherRow) -> Self {
        WeatherObservation {
            date: row.observed_on,
            mean_temperature: row.mean_temperature,
            min_temperature: row.min_temperature,
            max_temperature: row.max_temperature,
            sunshine_hours: row.sunshine_hours,
            precipitation_mm: row.precipitation_mm,
        }
    }
}

impl ClimateProgressService {
    /// Create a new ClimateProgressService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Compute climate progress for a field cultivation
    pub async fn compute_for_cultivation(
        &self,
        cultivation_id: Uuid,
    ) -> AppResult<ProgressResult> {
        let cultivation = sqlx::query_as::<_, CultivationRow>(
            r#"
            SELECT fc.id, fc.field_id, fc.crop_id, c.name AS crop_name,
                   fc.planted_on, fc.current_stage_order, fc.stage_entered_on,
                   fc.stage_gdd_carryover
            FROM field_cultivations fc
            JOIN crops c ON c.id = fc.crop_id
            WHERE fc.id = $1
            "#,
        )
        .bind(cultivation_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Field cultivation".to_string()))?;

        let stages = self.load_stages(cultivation.crop_id).await?;

        let window = DateRange::new(
            cultivation.stage_entered_on.unwrap_or(cultivation.planted_on),
            Utc::now().date_naive(),
        );
        let series = self
            .load_weather_series(cultivation.field_id, &window)
            .await?;

        let resume = cultivation.current_stage_order.map(|order| ResumeState {
            stage_order: u32::try_from(order).unwrap_or(0),
            accumulated_gdd: cultivation.stage_gdd_carryover.unwrap_or(Decimal::ZERO),
        });

        tracing::debug!(
            cultivation_id = %cultivation.id,
            window_start = %window.start,
            series_days = series.len(),
            stages = stages.len(),
            "computing climate progress"
        );

        let input = ClimateProgressInput {
            field_cultivation_id: cultivation.id,
            crop_name: cultivation.crop_name,
            stages,
            series,
            window_start: window.start,
            resume,
        };

        Ok(compute_progress(&input)?)
    }

    /// Load a crop's ordered stage list with requirement sub-objects
    async fn load_stages(&self, crop_id: Uuid) -> AppResult<Vec<CropStage>> {
        let rows = sqlx::query_as::<_, StageRow>(
            r#"
            SELECT s.id, s.name, s.stage_order,
                   t.id AS temperature_id, t.base_temperature, t.optimal_min, t.optimal_max,
                   t.low_stress_threshold, t.high_stress_threshold, t.frost_threshold,
                   t.sterility_risk_threshold, t.max_temperature,
                   th.required_gdd,
                   sn.id AS sunshine_id, sn.minimum_sunshine_hours, sn.target_sunshine_hours,
                   nu.id AS nutrient_id, nu.daily_nitrogen, nu.daily_phosphorus,
                   nu.daily_potassium, nu.region
            FROM crop_stages s
            LEFT JOIN stage_temperature_requirements t ON t.stage_id = s.id
            LEFT JOIN stage_thermal_requirements th ON th.stage_id = s.id
            LEFT JOIN stage_sunshine_requirements sn ON sn.stage_id = s.id
            LEFT JOIN stage_nutrient_requirements nu ON nu.stage_id = s.id
            WHERE s.crop_id = $1
            ORDER BY s.stage_order
            "#,
        )
        .bind(crop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Load the field's daily weather for the window as a gapless series with
    /// explicit missing-day markers
    async fn load_weather_series(
        &self,
        field_id: Uuid,
        window: &DateRange,
    ) -> AppResult<WeatherSeries> {
        let rows = sqlx::query_as::<_, WeatherRow>(
            r#"
            SELECT observed_on, mean_temperature, min_temperature, max_temperature,
                   sunshine_hours, precipitation_mm
            FROM daily_weather_observations
            WHERE field_id = $1
              AND observed_on >= $2
              AND observed_on <= $3
            ORDER BY observed_on
            "#,
        )
        .bind(field_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.db)
        .await?;

        let observations: Vec<WeatherObservation> = rows.into_iter().map(|r| r.into()).collect();
        WeatherSeries::from_observations(observations).map_err(|e| {
            AppError::Internal(format!("weather series for field {}: {}", field_id, e))
        })
    }
}
