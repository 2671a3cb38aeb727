use chrono::{DateTime, Utc};
use std::fmt;

use crate::limited::{Issuance, IssuanceMode};

/// Limited password handed back to the session layer
#[derive(Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub user: String,
    pub secret: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub mode: IssuanceMode,
}

impl From<Issuance> for Authenticated {
    fn from(issuance: Issuance) -> Self {
        Self {
            user: issuance.password.user,
            secret: issuance.password.secret,
            issued_at: issuance.password.issued_at,
            expires_at: issuance.password.expires_at,
            mode: issuance.mode,
        }
    }
}

impl fmt::Debug for Authenticated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticated")
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("mode", &self.mode)
            .finish()
    }
}

/// A limited password accepted for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    pub user: String,
    pub expires_at: DateTime<Utc>,
}
