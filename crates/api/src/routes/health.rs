//! Liveness and build information. Neither route touches the booking store.

use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

const SERVICE: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/health",
            get(|| async {
                Json(HealthResponse {
                    status: "ok",
                    service: SERVICE,
                })
            }),
        )
        .route(
            "/version",
            get(|| async {
                Json(VersionResponse {
                    service: SERVICE,
                    version: VERSION,
                })
            }),
        )
}
