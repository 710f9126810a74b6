//! Climate progress handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::services::synthetic_weather::{self, SyntheticSeriesInput};
use crate::services::ClimateProgressService;
use crate::AppState;
use shared::climate::ProgressResult;
use shared::models::DailyWeather;

/// Get climate progress for a field cultivation
///
/// GET /api/v1/field-cultivations/:cultivation_id/climate-progress
pub async fn get_climate_progress(
    State(state): State<AppState>,
    Path(cultivation_id): Path<Uuid>,
) -> AppResult<Json<ProgressResult>> {
    let service = ClimateProgressService::new(state.db);
    let result = service.compute_for_cultivation(cultivation_id).await?;
    Ok(Json(result))
}

/// Generate a deterministic synthetic weather series
///
/// POST /api/v1/demo/weather-series
///
/// Demo utility for exploring the engine without recorded observations.
pub async fn generate_demo_weather_series(
    Json(input): Json<SyntheticSeriesInput>,
) -> AppResult<Json<Vec<DailyWeather>>> {
    input.validate()?;
    Ok(Json(synthetic_weather::generate_series(&input)))
}
