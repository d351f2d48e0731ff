use hms_config::{AppConfig, ConfigError, StorageBackend};

// 环境变量是进程级共享状态，所有场景放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("HMS_JWT_SECRET", "secret");
        std::env::set_var("HMS_JWT_ACCESS_TTL_SECONDS", "3600");
        std::env::set_var("HMS_JWT_REFRESH_TTL_SECONDS", "7200");
        std::env::set_var("HMS_HTTP_ADDR", "127.0.0.1:8081");
        std::env::set_var("HMS_CURRENCY", "eur");
        std::env::remove_var("HMS_STORAGE");
        std::env::remove_var("HMS_DATABASE_URL");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert_eq!(config.jwt_access_ttl_seconds, 3600);
    assert_eq!(config.jwt_refresh_ttl_seconds, 7200);
    assert_eq!(config.storage, StorageBackend::Memory);
    assert_eq!(config.default_hotel_id, "hotel-1");
    assert_eq!(config.dashboard_refresh_seconds, 60);
    assert_eq!(config.currency, "EUR");

    unsafe {
        std::env::set_var("HMS_STORAGE", "postgres");
    }
    let err = AppConfig::from_env().expect_err("database url required");
    assert!(matches!(err, ConfigError::Missing(key) if key == "HMS_DATABASE_URL"));

    unsafe {
        std::env::set_var("HMS_STORAGE", "mongo");
    }
    let err = AppConfig::from_env().expect_err("unknown backend");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "HMS_STORAGE"));

    unsafe {
        std::env::set_var("HMS_STORAGE", "memory");
        std::env::set_var("HMS_DASHBOARD_REFRESH_SECONDS", "soon");
    }
    let err = AppConfig::from_env().expect_err("invalid number");
    assert_eq!(
        err.to_string(),
        "invalid value for HMS_DASHBOARD_REFRESH_SECONDS: soon"
    );
}
