//! 客户站点 API 开关（Active 表）
//!
//! - POST /api/check-api-status：读取当前状态
//! - PUT /api/check-api-status：取反并返回新状态
//! - GET /api/check-api-status：405

use crate::AppState;
use crate::utils::{lenient_json, message_error_response, message_response};
use api_contract::{ApiStatusResponse, DatabaseUrlRequest};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guard_remote::{ActiveStatus, ConnectionString, StatusError};

pub async fn read_api_status(State(state): State<AppState>, body: Bytes) -> Response {
    let target = match parse_target(&body) {
        Ok(target) => target,
        Err(response) => return response,
    };
    let result = state.status.read_status(&target).await;
    status_response(result, "Error checking API status")
}

pub async fn toggle_api_status(State(state): State<AppState>, body: Bytes) -> Response {
    let target = match parse_target(&body) {
        Ok(target) => target,
        Err(response) => return response,
    };
    let result = state.status.toggle_status(&target).await;
    status_response(result, "Error updating API status")
}

pub async fn api_status_method_not_allowed() -> Response {
    message_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn parse_target(body: &Bytes) -> Result<ConnectionString, Response> {
    let req: DatabaseUrlRequest = lenient_json(body);
    ConnectionString::parse_optional(req.database_url.as_deref())
        .map_err(|err| message_response(StatusCode::BAD_REQUEST, err.to_string()))
}

fn status_response(result: Result<ActiveStatus, StatusError>, failure: &str) -> Response {
    match result {
        Ok(active) => (
            StatusCode::OK,
            Json(ApiStatusResponse {
                status: active.status,
            }),
        )
            .into_response(),
        Err(StatusError::NotFound) => {
            message_response(StatusCode::NOT_FOUND, StatusError::NotFound.to_string())
        }
        Err(StatusError::Remote(err)) => {
            tracing::warn!(error = %err, context = failure, "api status request failed");
            message_error_response(StatusCode::INTERNAL_SERVER_ERROR, failure, err.to_string())
        }
    }
}
