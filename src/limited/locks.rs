use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per user
///
/// Holding a user's guard serializes every read-modify-write of that user's
/// limited password; other users are not blocked.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, user: &str) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard lock is released before awaiting
        let lock = self
            .locks
            .entry(user.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        lock.lock_owned().await
    }
}
