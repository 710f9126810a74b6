//! Route definitions for the Farm Planning Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Field cultivation climate progress
        .nest("/field-cultivations", cultivation_routes())
        // Demo utilities
        .nest("/demo", demo_routes())
}

/// Field cultivation routes
fn cultivation_routes() -> Router<AppState> {
    Router::new().route(
        "/:cultivation_id/climate-progress",
        get(handlers::get_climate_progress),
    )
}

/// Demo routes (synthetic data, never touches recorded observations)
fn demo_routes() -> Router<AppState> {
    Router::new().route(
        "/weather-series",
        post(handlers::generate_demo_weather_series),
    )
}
