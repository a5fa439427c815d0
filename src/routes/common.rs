//! Liveness, readiness and build info for the library service.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Body shared by `/health` and `/ready`. `database` is only reported by readiness.
#[derive(Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl Probe {
    fn up(database: Option<&'static str>) -> Json<Self> {
        Json(Probe { status: "ok", database })
    }
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

// Process is up; says nothing about storage.
async fn live() -> Json<Probe> {
    Probe::up(None)
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    match state.gateway.ping().await {
        Ok(()) => (StatusCode::OK, Probe::up(Some("ok"))),
        Err(e) => {
            tracing::warn!(error = %e, "gateway ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Probe {
                    status: "degraded",
                    database: Some("unavailable"),
                }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .with_state(state)
}
