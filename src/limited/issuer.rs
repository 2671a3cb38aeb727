use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{LimitedPassword, LimitedPasswordStore};
use crate::clock::add_secs;
use crate::policy::expiration::extended_expiry;
use crate::security::generate_secret;

/// How the returned limited password came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceMode {
    /// No usable row existed, a new secret was generated
    Fresh,
    /// Active row reused and its deadline pushed forward
    Extended,
    /// Active row reused as-is
    Reused,
    /// Active row replaced by a new secret with the requested window
    Superseded,
}

impl IssuanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuanceMode::Fresh => "fresh",
            IssuanceMode::Extended => "extended",
            IssuanceMode::Reused => "reused",
            IssuanceMode::Superseded => "superseded",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Issuance {
    pub password: LimitedPassword,
    pub mode: IssuanceMode,
}

/// Derives and persists limited passwords
///
/// Callers must hold the user's lock from [`super::UserLocks`] across
/// [`LimitedPasswordIssuer::issue`], which reads and then rewrites the row.
#[derive(Debug, Clone)]
pub struct LimitedPasswordIssuer {
    store: Arc<dyn LimitedPasswordStore>,
    secret_length: usize,
}

impl LimitedPasswordIssuer {
    pub fn new(store: Arc<dyn LimitedPasswordStore>, secret_length: usize) -> Self {
        Self {
            store,
            secret_length,
        }
    }

    pub fn store(&self) -> &Arc<dyn LimitedPasswordStore> {
        &self.store
    }

    /// Decide what to hand out, without touching storage
    ///
    /// * no row: fresh secret, `now + lifetime`
    /// * expired row: fresh secret, the old one kept as retired
    /// * active row, extension on: same secret, deadline extended
    /// * active row, extension off, no explicit TTL: same secret and deadline
    /// * active row, extension off, explicit TTL: fresh secret replaces the row
    pub fn plan(
        &self,
        user: &str,
        existing: Option<LimitedPassword>,
        now: DateTime<Utc>,
        lifetime_secs: u64,
        explicit_ttl: bool,
        extend_lifetime: bool,
    ) -> Issuance {
        let Some(mut row) = existing else {
            return Issuance {
                password: self.fresh(user, now, lifetime_secs),
                mode: IssuanceMode::Fresh,
            };
        };

        if !row.is_active_at(now) {
            return Issuance {
                password: self.fresh(user, now, lifetime_secs).replacing(row),
                mode: IssuanceMode::Fresh,
            };
        }

        if extend_lifetime {
            row.expires_at = extended_expiry(row.expires_at, now, lifetime_secs);
            Issuance {
                password: row,
                mode: IssuanceMode::Extended,
            }
        } else if explicit_ttl {
            Issuance {
                password: self.fresh(user, now, lifetime_secs).replacing(row),
                mode: IssuanceMode::Superseded,
            }
        } else {
            Issuance {
                password: row,
                mode: IssuanceMode::Reused,
            }
        }
    }

    /// Plan and persist the user's limited password
    #[::tracing::instrument(skip(self))]
    pub async fn issue(
        &self,
        user: &str,
        now: DateTime<Utc>,
        lifetime_secs: u64,
        explicit_ttl: bool,
        extend_lifetime: bool,
    ) -> Result<Issuance> {
        let existing = self.store.get(user).await?;
        let issuance = self.plan(user, existing, now, lifetime_secs, explicit_ttl, extend_lifetime);

        if issuance.mode != IssuanceMode::Reused {
            self.store.put(issuance.password.clone()).await?;
        }

        ::tracing::debug!(
            mode = issuance.mode.as_str(),
            expires_at = %issuance.password.expires_at,
            "Limited password issued"
        );

        Ok(issuance)
    }

    fn fresh(&self, user: &str, now: DateTime<Utc>, lifetime_secs: u64) -> LimitedPassword {
        LimitedPassword::new(
            user,
            generate_secret(self.secret_length),
            now,
            add_secs(now, lifetime_secs),
        )
    }
}
