//! 外部库注册
//!
//! - POST /api/register：在客户站点库中创建用户并补齐基线数据

use crate::AppState;
use crate::utils::{error_response, lenient_json, remote_user_to_dto};
use api_contract::{RegisterRequest, RegisterResponse};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guard_remote::{ProvisionError, RegistrationRequest};

pub async fn register(State(state): State<AppState>, body: Bytes) -> Response {
    let req: RegisterRequest = lenient_json(&body);
    let request = RegistrationRequest {
        name: req.name,
        email: req.email,
        password: req.password,
        database_url: req.database_url,
        role: req.role,
    };
    provision_response(state.provisioner.register_and_provision(request).await)
}

/// 注册结果转 HTTP 响应（子账户开通复用）
pub fn provision_response(result: Result<guard_remote::RemoteUser, ProvisionError>) -> Response {
    match result {
        Ok(user) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                message: "User registered successfully".to_string(),
                user: remote_user_to_dto(user),
            }),
        )
            .into_response(),
        Err(err) if err.is_client_error() => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "remote registration failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to register user")
        }
    }
}
