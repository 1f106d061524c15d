use domain::RuntimeMode;
use guard_config::AppConfig;
use std::time::Duration;

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("GUARD_HTTP_ADDR", "127.0.0.1:8081");
        std::env::set_var("GUARD_ENV", "production");
        std::env::set_var("GUARD_REMOTE_QUERY_TIMEOUT_MS", "2500");
        std::env::set_var("GUARD_MANAGED_TLS_MARKERS", "neon.tech, supabase.co ,");
        std::env::remove_var("GUARD_DATABASE_URL");
        std::env::remove_var("GUARD_REMOTE_CONNECT_TIMEOUT_MS");
        std::env::remove_var("GUARD_DEFAULT_MAX_ROLE");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert!(config.database_url.is_none());
    assert_eq!(config.remote.runtime_mode, RuntimeMode::Production);
    assert_eq!(config.remote.query_timeout, Duration::from_millis(2500));
    assert_eq!(config.remote.connect_timeout, Duration::from_millis(10_000));
    assert_eq!(
        config.remote.managed_tls_markers,
        vec!["neon.tech".to_string(), "supabase.co".to_string()]
    );
    assert_eq!(config.remote.default_max_role, 6);
}
