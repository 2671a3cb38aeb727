//! Long-term credential verification
//!
//! The user catalog is owned elsewhere; the policy core only needs to ask
//! whether a user's long-term password is correct.

mod local;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

pub use local::LocalCredentialStore;

#[async_trait]
pub trait CredentialStore: Send + Sync + Debug {
    /// `Ok(false)` for an unknown user or a wrong password
    async fn verify(&self, user: &str, password: &str) -> Result<bool>;
}
