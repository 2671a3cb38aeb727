use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use super::{LimitedPassword, LimitedPasswordStore};

/// In-memory limited password rows backed by DashMap
#[derive(Debug, Clone, Default)]
pub struct LocalLimitedPasswordStore {
    rows: Arc<DashMap<String, LimitedPassword>>,
}

impl LocalLimitedPasswordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LimitedPasswordStore for LocalLimitedPasswordStore {
    async fn get(&self, user: &str) -> Result<Option<LimitedPassword>> {
        Ok(self.rows.get(user).map(|row| row.value().clone()))
    }

    #[::tracing::instrument(skip(self, password), fields(user = %password.user, expires_at = %password.expires_at))]
    async fn put(&self, password: LimitedPassword) -> Result<()> {
        self.rows.insert(password.user.clone(), password);
        Ok(())
    }

    #[::tracing::instrument(skip(self))]
    async fn remove(&self, user: &str) -> Result<bool> {
        Ok(self.rows.remove(user).is_some())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.rows.len())
    }
}
