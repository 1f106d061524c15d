//! ClientGuard HTTP API。
//!
//! - 外部库：/api/check-db、/api/check-api-status、/api/register
//! - 版本公告：/api/update、/api/check-update
//! - 子账户：/api/children/*
//! - 运维：/health、/metrics

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::build_router;
pub use state::AppState;
