//! HTTP endpoints.
//!
//! - `<telemetry_path>` : one scrape, Prometheus text format, always 200
//! - `/healthz`         : exporter liveness
//! - anything else      : landing page

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use riak_exporter_core::exposition;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(landing_page(&state.cfg().web.telemetry_path))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let snapshot = state.exporter().scrape().await;
    let body = exposition::render(&snapshot);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
        body,
    )
        .into_response()
}

fn landing_page(telemetry_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Riak exporter</title></head>\n\
         <body>\n\
         <h1>Riak exporter</h1>\n\
         <p><a href='{telemetry_path}'>Metrics</a></p>\n\
         </body>\n\
         </html>\n"
    )
}
