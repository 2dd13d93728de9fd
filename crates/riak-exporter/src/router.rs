//! Axum router wiring.
//!
//! `<telemetry_path>` serves metrics, `/healthz` reports liveness of the
//! exporter itself, everything else gets the landing page.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub const HEALTHZ_PATH: &str = "/healthz";

pub fn build_router(state: AppState) -> Router {
    let telemetry_path = state.cfg().web.telemetry_path.clone();
    Router::new()
        .route(&telemetry_path, get(ops::metrics))
        .route(HEALTHZ_PATH, get(ops::healthz))
        .fallback(ops::landing)
        .with_state(state)
}
