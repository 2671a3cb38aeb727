//! Configuration loading and validation
//!
//! Tests touching process environment variables run under `#[serial]`.

use grid_auth::config::*;
use serial_test::serial;
use std::env;

mod utils {
    /// Clean up environment variables with GRID_AUTH prefix
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("GRID_AUTH"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

#[test]
#[serial]
fn test_load_default_config_success() {
    utils::clean_env_vars();
    unsafe { env::remove_var("APP_ENV") };

    let config = load();
    assert!(config.is_ok(), "Failed to load default configuration: {:?}", config.err());
    let config = config.unwrap();

    assert_eq!(config.app.name, "grid-auth");
    assert_eq!(config.app.environment, "development");

    assert_eq!(config.auth.namespace, "authentication");
    assert_eq!(config.auth.password_min_time, 121);
    assert_eq!(config.auth.password_max_time, 1_209_600);
    assert!(config.auth.password_extend_lifetime);
    assert_eq!(config.auth.argon2.memory_cost, 65536);
}

#[test]
#[serial]
fn test_environment_variable_override() {
    utils::clean_env_vars();
    unsafe {
        env::remove_var("APP_ENV");
        env::set_var("GRID_AUTH__AUTH__PASSWORD_MAX_TIME", "1216800");
        env::set_var("GRID_AUTH__AUTH__PASSWORD_EXTEND_LIFETIME", "false");
        env::set_var("GRID_AUTH__APP__NAME", "custom-grid");
    }

    let config = load();
    utils::clean_env_vars();
    let config = config.unwrap();

    assert_eq!(config.auth.password_max_time, 1_216_800);
    assert!(!config.auth.password_extend_lifetime);
    assert_eq!(config.app.name, "custom-grid");
    assert_eq!(config.auth.password_min_time, 121, "untouched keys keep file values");
}

#[test]
#[serial]
fn test_environment_variable_failing_validation() {
    utils::clean_env_vars();
    unsafe {
        env::remove_var("APP_ENV");
        env::set_var("GRID_AUTH__AUTH__PASSWORD_MIN_TIME", "7210");
        env::set_var("GRID_AUTH__AUTH__PASSWORD_MAX_TIME", "7190");
    }

    let result = load();
    utils::clean_env_vars();

    match result {
        Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("password_min_time")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_defaults_are_valid() {
    assert!(AppConfig::with_defaults().validate().is_ok());
}

#[test]
fn test_validation_empty_app_name() {
    let mut config = AppConfig::with_defaults();
    config.app.name = "".to_string();

    match config.validate() {
        Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("app.name")),
        other => panic!("Expected ValidationError for empty app name, got {other:?}"),
    }
}

#[test]
fn test_validation_empty_namespace() {
    let mut config = AppConfig::with_defaults();
    config.auth.namespace = "".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_validation_zero_lifetimes() {
    let mut config = AppConfig::with_defaults();
    config.auth.password_min_time = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::with_defaults();
    config.auth.password_max_time = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_short_secret() {
    let mut config = AppConfig::with_defaults();
    config.auth.secret_length = 4;

    assert!(config.validate().is_err());
}

#[test]
fn test_validation_argon2_zero_memory_cost() {
    let mut config = AppConfig::with_defaults();
    config.auth.argon2.memory_cost = 0;

    match config.validate() {
        Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("memory_cost")),
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}
