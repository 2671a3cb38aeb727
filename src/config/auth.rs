use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Authentication configuration
///
/// The `password_*` values are the built-in defaults of the lifetime policy.
/// They seed the grid configuration on start and take over whenever a grid
/// value is missing or malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Grid configuration namespace holding the password options
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Default minimum limited password lifetime in seconds
    #[serde(default = "default_password_min_time")]
    pub password_min_time: u64,
    /// Default maximum limited password lifetime in seconds
    #[serde(default = "default_password_max_time")]
    pub password_max_time: u64,
    /// Default for refreshing an active limited password on re-authentication
    #[serde(default = "default_password_extend_lifetime")]
    pub password_extend_lifetime: bool,
    /// Length of generated limited password secrets
    #[serde(default = "default_secret_length")]
    pub secret_length: usize,
    /// Argon2 configuration for long-term password hashes
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of threads)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
}

fn default_namespace() -> String {
    "authentication".to_string()
}

fn default_password_min_time() -> u64 {
    121
}

fn default_password_max_time() -> u64 {
    1_209_600 // 2 weeks
}

fn default_password_extend_lifetime() -> bool {
    true
}

fn default_secret_length() -> usize {
    32
}

fn default_argon2_memory_cost() -> u32 {
    65536 // 64 MB
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            password_min_time: default_password_min_time(),
            password_max_time: default_password_max_time(),
            password_extend_lifetime: default_password_extend_lifetime(),
            secret_length: default_secret_length(),
            argon2: Argon2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::ValidationError("auth.namespace cannot be empty".to_string()));
        }
        if self.password_min_time == 0 {
            return Err(ConfigError::ValidationError("auth.password_min_time must be > 0".to_string()));
        }
        if self.password_max_time == 0 {
            return Err(ConfigError::ValidationError("auth.password_max_time must be > 0".to_string()));
        }
        // Defaults replace malformed grid values, they must be satisfiable themselves
        if self.password_min_time > self.password_max_time {
            return Err(ConfigError::ValidationError(
                "auth.password_min_time must be <= auth.password_max_time".to_string(),
            ));
        }
        if self.secret_length < 8 {
            return Err(ConfigError::ValidationError("auth.secret_length must be >= 8".to_string()));
        }
        self.argon2.validate()?;
        Ok(())
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.memory_cost must be > 0".to_string()));
        }
        if self.time_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.time_cost must be > 0".to_string()));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.parallelism must be > 0".to_string()));
        }
        if self.hash_length == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.hash_length must be > 0".to_string()));
        }
        Ok(())
    }
}

impl WithDefaults for AuthConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}

impl WithDefaults for Argon2Config {
    fn with_defaults() -> Self {
        Self::default()
    }
}
