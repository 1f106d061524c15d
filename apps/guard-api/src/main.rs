//! ClientGuard API 服务入口。

use guard_api::{AppState, build_router};
use guard_config::{AppConfig, RemoteConfig};
use guard_remote::{BootstrapDefaults, ConnectionSettings, PgRemoteDriver};
use guard_storage::{
    ChildStore, InMemoryChildStore, InMemoryUpdateStore, PgChildStore, PgUpdateStore, UpdateStore,
    connect_pool,
};
use guard_telemetry::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    // 本地存储：配置了 GUARD_DATABASE_URL 用 Postgres，否则用内存
    let (child_store, update_store): (Arc<dyn ChildStore>, Arc<dyn UpdateStore>) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = connect_pool(database_url).await?;
                (
                    Arc::new(PgChildStore::new(pool.clone())),
                    Arc::new(PgUpdateStore::new(pool)),
                )
            }
            None => {
                tracing::warn!("GUARD_DATABASE_URL not set, using in-memory stores");
                (
                    Arc::new(InMemoryChildStore::new()),
                    Arc::new(InMemoryUpdateStore::new()),
                )
            }
        };

    let driver = Arc::new(PgRemoteDriver::new(connection_settings(&config.remote)));
    let defaults = BootstrapDefaults {
        max_role: config.remote.default_max_role,
        ..BootstrapDefaults::default()
    };
    let state = AppState::new(driver, defaults, child_store, update_store);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!(
        addr = %config.http_addr,
        mode = ?config.remote.runtime_mode,
        "guard-api listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

fn connection_settings(remote: &RemoteConfig) -> ConnectionSettings {
    ConnectionSettings {
        runtime_mode: remote.runtime_mode,
        connect_timeout: remote.connect_timeout,
        query_timeout: remote.query_timeout,
        managed_tls_markers: remote.managed_tls_markers.clone(),
    }
}
