//! 运维端点
//!
//! - GET /health
//! - GET /metrics

use api_contract::MetricsSnapshotDto;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guard_telemetry::metrics;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(MetricsSnapshotDto {
            probes_succeeded: snapshot.probes_succeeded,
            probes_failed: snapshot.probes_failed,
            status_reads: snapshot.status_reads,
            status_toggles: snapshot.status_toggles,
            registrations: snapshot.registrations,
            registration_conflicts: snapshot.registration_conflicts,
            provisioning_failures: snapshot.provisioning_failures,
            remote_connects: snapshot.remote_connects,
            remote_closes: snapshot.remote_closes,
        }),
    )
        .into_response()
}
