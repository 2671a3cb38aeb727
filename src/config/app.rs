use serde::{Deserialize, Serialize};

use super::{AuthConfig, ConfigError, Validate, WithDefaults};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default = "AppMetadata::default")]
    pub app: AppMetadata,
    /// Password lifetime policy defaults and hashing parameters
    #[serde(default = "AuthConfig::default")]
    pub auth: AuthConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Application environment (development, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_app_name() -> String {
    "grid-auth".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: default_environment(),
        }
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("app.name cannot be empty".to_string()));
        }
        if self.version.is_empty() {
            return Err(ConfigError::ValidationError("app.version cannot be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::ValidationError("app.environment cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

impl WithDefaults for AppConfig {
    fn with_defaults() -> Self {
        Self {
            app: AppMetadata::default(),
            auth: AuthConfig::with_defaults(),
        }
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Environment variables: GRID_AUTH__AUTH__PASSWORD_MAX_TIME=1216800
/// 2. config/local.toml (git-ignored, developer overrides)
/// 3. config/{APP_ENV}.toml (development/staging/production)
/// 4. config/default.toml (base defaults)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix("GRID_AUTH")
                .separator("__")
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate()?;

    ::tracing::debug!(
        environment = %app_config.app.environment,
        namespace = %app_config.auth.namespace,
        "Configuration loaded"
    );

    Ok(app_config)
}
