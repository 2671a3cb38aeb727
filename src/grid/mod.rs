//! Grid configuration store
//!
//! Server-wide named settings addressed by `(namespace, option)`. Values are
//! kept as raw text and `set` accepts anything: administrators may stage values
//! that are not yet consistent, and consumers decide how to interpret them.

mod local;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use local::LocalGridConfiguration;

/// Option names in the authentication namespace
pub mod options {
    pub const PASSWORD_MIN_TIME: &str = "password_min_time";
    pub const PASSWORD_MAX_TIME: &str = "password_max_time";
    pub const PASSWORD_EXTEND_LIFETIME: &str = "password_extend_lifetime";
}

/// A single stored setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfigurationEntry {
    pub namespace: String,
    pub option: String,
    pub value: String,
}

/// Backing store for grid configuration
///
/// Implementations must give read-after-write consistency: a `get` issued after
/// `set` returns observes the new value.
#[async_trait]
pub trait GridConfiguration: Send + Sync + Debug {
    /// Read a value, `None` if the option was never set
    async fn get(&self, namespace: &str, option: &str) -> Result<Option<String>>;

    /// Overwrite a value unconditionally
    async fn set(&self, namespace: &str, option: &str, value: &str) -> Result<()>;

    /// Insert a value only if the option is absent, returns whether it was inserted
    async fn seed(&self, namespace: &str, option: &str, value: &str) -> Result<bool>;

    /// All entries of a namespace, ordered by option name
    async fn entries(&self, namespace: &str) -> Result<Vec<GridConfigurationEntry>>;
}
