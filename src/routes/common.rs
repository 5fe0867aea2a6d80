//! Liveness, readiness and build info, mounted at the root.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

/// Build identity reported by `/version`.
#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
}

const PACKAGE: PackageInfo = PackageInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

async fn alive() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 200 when the store answers a round trip, 503 otherwise.
async fn store_reachable(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "database": "ok" }))),
        Err(e) => {
            tracing::warn!(error = %e, "store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}

async fn package() -> Json<PackageInfo> {
    Json(PACKAGE)
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(alive))
        .route("/ready", get(store_reachable))
        .route("/version", get(package))
        .with_state(state)
}
