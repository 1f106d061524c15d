//! 外部库连通性探测
//!
//! - POST /api/check-db

use crate::AppState;
use crate::utils::lenient_json;
use api_contract::{CheckDbResponse, DatabaseUrlRequest};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guard_remote::ConnectionString;

/// 对调用方提供的连接串做一次连通性探测
pub async fn check_db(State(state): State<AppState>, body: Bytes) -> Response {
    let req: DatabaseUrlRequest = lenient_json(&body);
    let target = match ConnectionString::parse_optional(req.database_url.as_deref()) {
        Ok(target) => target,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CheckDbResponse {
                    success: false,
                    message: err.to_string(),
                    error: None,
                    code: None,
                }),
            )
                .into_response();
        }
    };
    let report = state.prober.probe(&target).await;
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(CheckDbResponse {
            success: report.success,
            message: report.message,
            error: report.error,
            code: report.code,
        }),
    )
        .into_response()
}
