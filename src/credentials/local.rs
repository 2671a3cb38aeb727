use anyhow::{anyhow, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

use super::CredentialStore;
use crate::security::{PasswordHasher, Verification};

/// In-memory user catalog keeping Argon2id hashes
#[derive(Clone)]
pub struct LocalCredentialStore {
    hashes: Arc<DashMap<String, String>>,
    hasher: Arc<PasswordHasher>,
}

impl LocalCredentialStore {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            hashes: Arc::new(DashMap::new()),
            hasher: Arc::new(hasher),
        }
    }

    /// Create or replace a user's long-term password
    #[::tracing::instrument(skip(self, password))]
    pub fn add_user(&self, user: &str, password: &str) -> Result<()> {
        let hash = self
            .hasher
            .hash(password)
            .map_err(|e| anyhow!("failed to hash password for {}: {}", user, e))?;

        self.hashes.insert(user.to_string(), hash);
        ::tracing::debug!("User credentials stored");
        Ok(())
    }

    /// Remove a user, returns whether the user existed
    #[::tracing::instrument(skip(self))]
    pub fn remove_user(&self, user: &str) -> bool {
        self.hashes.remove(user).is_some()
    }

    pub fn contains(&self, user: &str) -> bool {
        self.hashes.contains_key(user)
    }

    /// Re-hash an accepted password under the current Argon2 parameters
    fn upgrade(&self, user: &str, password: &str) {
        match self.hasher.hash(password) {
            Ok(rehashed) => {
                self.hashes.insert(user.to_string(), rehashed);
                ::tracing::info!("Password hash upgraded to current parameters");
            }
            Err(e) => {
                ::tracing::warn!(error = %e, "Password hash upgrade failed, keeping stale hash");
            }
        }
    }
}

impl fmt::Debug for LocalCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCredentialStore")
            .field("users", &self.hashes.len())
            .finish()
    }
}

#[async_trait]
impl CredentialStore for LocalCredentialStore {
    #[::tracing::instrument(skip(self, password))]
    async fn verify(&self, user: &str, password: &str) -> Result<bool> {
        let Some(hash) = self.hashes.get(user).map(|entry| entry.value().clone()) else {
            ::tracing::debug!("Unknown user");
            return Ok(false);
        };

        let verification = self
            .hasher
            .check(password, &hash)
            .map_err(|e| anyhow!("stored hash for {} is unreadable: {}", user, e))?;

        if verification == Verification::AcceptedStale {
            self.upgrade(user, password);
        }

        Ok(verification.is_accepted())
    }
}
