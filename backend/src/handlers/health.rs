//! Service health endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Health report: service identity plus a live database probe
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub service: &'static str,
    pub version: &'static str,
    pub database: DatabaseStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub reachable: bool,
    pub pool_size: u32,
    pub pool_idle: usize,
}

/// Report service health, probing the database with a trivial query
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let reachable = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    Json(HealthStatus {
        service: "vendyx-backend",
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseStatus {
            reachable,
            pool_size: state.db.size(),
            pool_idle: state.db.num_idle(),
        },
    })
}
