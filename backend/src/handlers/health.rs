//! Service health endpoint
//!
//! Reports process liveness and whether the connection pool can still reach
//! PostgreSQL, for deployment probes and uptime monitoring.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Report service and database health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // A trivial round trip proves the pool is alive
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "reachable".to_string(),
        Err(_) => "unreachable".to_string(),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}
