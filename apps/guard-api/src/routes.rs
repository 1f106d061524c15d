//! 路由定义
//!
//! 集中管理所有 API 路由：
//! - 运维：/health, /metrics
//! - 外部库：/api/check-db, /api/check-api-status, /api/register
//! - 版本公告：/api/update/*, /api/check-update
//! - 子账户：/api/children/*

use crate::AppState;
use crate::handlers::*;
use crate::middleware::request_context;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

/// 创建 API 路由（不含状态与中间件）
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/api/check-db", post(check_db))
        .route(
            "/api/check-api-status",
            post(read_api_status)
                .put(toggle_api_status)
                .get(api_status_method_not_allowed),
        )
        .route("/api/register", post(register))
        .route("/api/update", get(list_updates).post(create_update))
        .route(
            "/api/update/:update_id",
            put(modify_update).delete(delete_update),
        )
        .route("/api/check-update", get(check_update))
        .route("/api/children", get(list_children).post(create_child))
        .route("/api/children/search", get(search_children))
        .route("/api/children/dashboard", get(children_dashboard))
        .route(
            "/api/children/:child_id",
            get(get_child)
                .patch(update_child_field)
                .delete(delete_child),
        )
        .route("/api/children/:child_id/provision", post(provision_child))
}

/// 完整应用：路由 + 状态 + 请求上下文 + HTTP trace
pub fn build_router(state: AppState) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_context))
}
