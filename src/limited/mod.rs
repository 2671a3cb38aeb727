//! Limited passwords
//!
//! A limited password is the short-lived secret handed out in place of a user's
//! long-term password. There is at most one per user: every session of that
//! user refers to the same record, so changing its deadline changes it for all
//! of them.

mod issuer;
mod local;
mod locks;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::{self, Debug};

use crate::policy::LimitedPasswordState;

pub use issuer::{Issuance, IssuanceMode, LimitedPasswordIssuer};
pub use local::LocalLimitedPasswordStore;
pub use locks::UserLocks;

/// The single limited password row of a user
#[derive(Clone, PartialEq, Eq)]
pub struct LimitedPassword {
    pub user: String,
    pub secret: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub state: LimitedPasswordState,
    /// Secret of the row this one replaced, still recognized as no longer valid
    pub retired_secret: Option<String>,
}

impl LimitedPassword {
    pub fn new(
        user: impl Into<String>,
        secret: String,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user: user.into(),
            secret,
            issued_at,
            expires_at,
            state: LimitedPasswordState::Active,
            retired_secret: None,
        }
    }

    /// Take over from `replaced`, remembering its secret
    pub fn replacing(mut self, replaced: LimitedPassword) -> Self {
        self.retired_secret = Some(replaced.secret);
        self
    }

    /// Active and not past its deadline at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.state == LimitedPasswordState::Active
            && !crate::policy::expiration::is_past(now, self.expires_at)
    }
}

impl Debug for LimitedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitedPassword")
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("state", &self.state)
            .field("retired_secret", &self.retired_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Persistence for limited passwords, keyed by user
#[async_trait]
pub trait LimitedPasswordStore: Send + Sync + Debug {
    async fn get(&self, user: &str) -> Result<Option<LimitedPassword>>;

    /// Insert or replace the user's row
    async fn put(&self, password: LimitedPassword) -> Result<()>;

    /// Drop the user's row, returns whether one existed
    async fn remove(&self, user: &str) -> Result<bool>;

    /// Number of stored rows, expired ones included
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
