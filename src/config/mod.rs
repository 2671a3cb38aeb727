pub mod app;
pub mod auth;

use thiserror::Error;

pub use app::{AppConfig, AppMetadata};
pub use auth::{Argon2Config, AuthConfig};

/// Startup configuration failure
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    ValidationError(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Semantic checks run after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Construct a configuration section from built-in defaults only
pub trait WithDefaults {
    fn with_defaults() -> Self;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
