use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::Ttl;

/// Exchange a long-term password for a limited password
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthenticateRequest {
    pub user: String,
    pub password: String,
    /// Requested lifetime; `None` means the policy minimum, unchecked
    #[serde(default)]
    pub ttl: Option<Ttl>,
}

impl AuthenticateRequest {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

impl fmt::Debug for AuthenticateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticateRequest")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Present a limited password on a later request
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct VerifyRequest {
    pub user: String,
    pub secret: String,
}

impl VerifyRequest {
    pub fn new(user: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for VerifyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyRequest")
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .finish()
    }
}
