use serde::{Deserialize, Serialize};
use std::fmt;

use super::PasswordLifetimePolicy;
use crate::error::{AuthError, AuthResult};

/// Requested time-to-live of a limited password, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ttl(u64);

impl Ttl {
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Clients express TTL in hours
    pub const fn from_hours(hours: u64) -> Self {
        Self(hours.saturating_mul(3600))
    }

    pub const fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Decide the lifetime of the limited password to issue
///
/// Without a requested TTL the check is skipped and the policy minimum is used,
/// even when the configured window is unsatisfiable. An explicit TTL must lie in
/// `[min, max]` inclusive.
pub fn validate_ttl(requested: Option<Ttl>, policy: &PasswordLifetimePolicy) -> AuthResult<u64> {
    let Some(ttl) = requested else {
        return Ok(policy.default_lifetime());
    };

    let ttl = ttl.as_secs();
    let rejected = AuthError::InvalidTtl {
        ttl,
        min: policy.min_time,
        max: policy.max_time,
    };

    if !policy.is_satisfiable() {
        ::tracing::warn!(ttl, min = policy.min_time, max = policy.max_time, "TTL rejected, window is empty");
        return Err(rejected);
    }

    if ttl < policy.min_time || ttl > policy.max_time {
        ::tracing::info!(ttl, min = policy.min_time, max = policy.max_time, "TTL rejected, outside window");
        return Err(rejected);
    }

    Ok(ttl)
}
