//! Password lifetime policy
//!
//! Turns whatever text sits in the grid configuration into an effective
//! `[min, max]` window and extension flag. Malformed values never fail a
//! request: they are replaced by the defaults from [`AuthConfig`].

pub mod expiration;
pub mod ttl;

use anyhow::Result;

use crate::config::AuthConfig;
use crate::grid::{options, GridConfiguration};

pub use expiration::{LimitedPasswordState, Verdict};
pub use ttl::{validate_ttl, Ttl};

/// Effective policy for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordLifetimePolicy {
    /// Minimum lifetime in seconds, also the lifetime when no TTL is requested
    pub min_time: u64,
    /// Maximum lifetime in seconds
    pub max_time: u64,
    /// Refresh an active limited password on re-authentication
    pub extend_lifetime: bool,
    /// Options whose stored value was replaced by a default
    pub fallbacks: Vec<&'static str>,
}

impl PasswordLifetimePolicy {
    /// Policy made only of the configured defaults
    pub fn defaults(config: &AuthConfig) -> Self {
        Self {
            min_time: config.password_min_time,
            max_time: config.password_max_time,
            extend_lifetime: config.password_extend_lifetime,
            fallbacks: Vec::new(),
        }
    }

    /// Read the current grid values and resolve them against the defaults
    #[::tracing::instrument(skip(store, config), fields(namespace = %config.namespace))]
    pub async fn resolve(store: &dyn GridConfiguration, config: &AuthConfig) -> Result<Self> {
        let namespace = config.namespace.as_str();

        let min = store.get(namespace, options::PASSWORD_MIN_TIME).await?;
        let max = store.get(namespace, options::PASSWORD_MAX_TIME).await?;
        let extend = store.get(namespace, options::PASSWORD_EXTEND_LIFETIME).await?;

        Ok(Self::from_values(
            min.as_deref(),
            max.as_deref(),
            extend.as_deref(),
            config,
        ))
    }

    /// Resolve raw option values, `None` meaning the option is absent
    pub fn from_values(
        min: Option<&str>,
        max: Option<&str>,
        extend: Option<&str>,
        config: &AuthConfig,
    ) -> Self {
        let mut policy = Self::defaults(config);

        match min.and_then(parse_seconds) {
            Some(value) => policy.min_time = value,
            None => policy.fall_back(options::PASSWORD_MIN_TIME, min),
        }

        match max.and_then(parse_seconds) {
            Some(value) => policy.max_time = value,
            None => policy.fall_back(options::PASSWORD_MAX_TIME, max),
        }

        match extend.and_then(parse_flag) {
            Some(value) => policy.extend_lifetime = value,
            None => policy.fall_back(options::PASSWORD_EXTEND_LIFETIME, extend),
        }

        if !policy.is_satisfiable() {
            ::tracing::warn!(
                min_time = policy.min_time,
                max_time = policy.max_time,
                "password_min_time exceeds password_max_time, every explicit TTL will be rejected"
            );
        }

        policy
    }

    fn fall_back(&mut self, option: &'static str, raw: Option<&str>) {
        match raw {
            Some(raw) => {
                ::tracing::warn!(option, value = %raw, "Malformed grid configuration value, using default");
            }
            None => {
                ::tracing::debug!(option, "Grid configuration value not set, using default");
            }
        }
        self.fallbacks.push(option);
    }

    /// Whether any explicit TTL can satisfy both bounds
    pub fn is_satisfiable(&self) -> bool {
        self.min_time <= self.max_time
    }

    /// Lifetime used when the caller does not ask for a TTL
    pub fn default_lifetime(&self) -> u64 {
        self.min_time
    }
}

/// Parse a lifetime in seconds
///
/// Accepts surrounding whitespace. Empty, non-numeric, negative, zero, and values
/// beyond `u64::MAX` are rejected.
pub fn parse_seconds(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

/// Parse a boolean-like flag
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
