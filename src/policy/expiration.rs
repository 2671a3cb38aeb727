//! Expiration state machine
//!
//! ```text
//! ┌────────┐  now > expires_at   ┌─────────┐
//! │ Active │ ──────────────────► │ Expired │
//! └────────┘  (checked lazily)   └─────────┘
//! ```
//!
//! There is no background sweep. A limited password moves to `Expired` the first
//! time a verification observes it past its deadline, and never comes back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::add_secs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitedPasswordState {
    Active,
    Expired,
}

impl fmt::Display for LimitedPasswordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitedPasswordState::Active => write!(f, "Active"),
            LimitedPasswordState::Expired => write!(f, "Expired"),
        }
    }
}

/// Outcome of checking a limited password against the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Still within its window
    Valid,
    /// Past its window, observed for the first time
    ExpiredNow,
    /// Already reported expired by an earlier check
    AlreadyExpired,
}

/// `now` is past `expires_at`; the deadline itself is still valid
pub fn is_past(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> bool {
    now > expires_at
}

pub fn evaluate(
    state: LimitedPasswordState,
    now: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Verdict {
    match state {
        LimitedPasswordState::Expired => Verdict::AlreadyExpired,
        LimitedPasswordState::Active if is_past(now, expires_at) => Verdict::ExpiredNow,
        LimitedPasswordState::Active => Verdict::Valid,
    }
}

/// New deadline after re-authenticating with extension enabled
///
/// Never moves an existing deadline backwards.
pub fn extended_expiry(
    current: DateTime<Utc>,
    now: DateTime<Utc>,
    lifetime_secs: u64,
) -> DateTime<Utc> {
    current.max(add_secs(now, lifetime_secs))
}
