//! Authentication entry point
//!
//! [`AuthService`] wires the grid configuration, the long-term credential
//! store, and the limited password issuer together. Each operation lives in
//! its own file under `auth/` or `grid/`.

pub mod auth;
pub mod grid;

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::AuthConfig;
use crate::credentials::CredentialStore;
use crate::grid::GridConfiguration;
use crate::limited::{LimitedPasswordIssuer, LimitedPasswordStore, UserLocks};
use crate::metrics::AuthMetrics;
use crate::policy::PasswordLifetimePolicy;

#[derive(Debug, Clone)]
pub struct AuthService {
    config: AuthConfig,
    grid: Arc<dyn GridConfiguration>,
    credentials: Arc<dyn CredentialStore>,
    issuer: LimitedPasswordIssuer,
    locks: UserLocks,
    clock: Arc<dyn Clock>,
    metrics: AuthMetrics,
}

impl AuthService {
    pub fn new(
        config: AuthConfig,
        grid: Arc<dyn GridConfiguration>,
        credentials: Arc<dyn CredentialStore>,
        limited: Arc<dyn LimitedPasswordStore>,
    ) -> Self {
        let issuer = LimitedPasswordIssuer::new(limited, config.secret_length);

        Self {
            config,
            grid,
            credentials,
            issuer,
            locks: UserLocks::new(),
            clock: Arc::new(SystemClock),
            metrics: AuthMetrics::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: AuthMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn grid(&self) -> &Arc<dyn GridConfiguration> {
        &self.grid
    }

    pub fn limited_passwords(&self) -> &Arc<dyn LimitedPasswordStore> {
        self.issuer.store()
    }

    /// Effective policy as the next authentication would see it
    pub async fn policy(&self) -> anyhow::Result<PasswordLifetimePolicy> {
        let policy = PasswordLifetimePolicy::resolve(self.grid.as_ref(), &self.config).await?;

        for option in policy.fallbacks.iter().copied() {
            self.metrics.record_grid_fallback(option);
        }

        Ok(policy)
    }
}
