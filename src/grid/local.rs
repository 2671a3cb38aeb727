use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use super::{GridConfiguration, GridConfigurationEntry};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GridKey {
    namespace: String,
    option: String,
}

impl GridKey {
    fn new(namespace: &str, option: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            option: option.to_string(),
        }
    }
}

/// In-memory grid configuration backed by DashMap
#[derive(Debug, Clone)]
pub struct LocalGridConfiguration {
    store: Arc<DashMap<GridKey, String>>,
}

impl LocalGridConfiguration {
    /// Create a store with the default shard count (CPU count * 4)
    pub fn new() -> Self {
        Self::with_shard_count(num_cpus::get() * 4)
    }

    /// Create a store with a specific shard count, rounded up to a power of two
    pub fn with_shard_count(shard_count: usize) -> Self {
        let shard_count = shard_count.max(2).next_power_of_two();

        Self {
            store: Arc::new(DashMap::with_shard_amount(shard_count)),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for LocalGridConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GridConfiguration for LocalGridConfiguration {
    #[::tracing::instrument(skip(self))]
    async fn get(&self, namespace: &str, option: &str) -> Result<Option<String>> {
        let value = self
            .store
            .get(&GridKey::new(namespace, option))
            .map(|entry| entry.value().clone());

        if value.is_none() {
            ::tracing::debug!("Grid configuration option not set");
        }

        Ok(value)
    }

    #[::tracing::instrument(skip(self))]
    async fn set(&self, namespace: &str, option: &str, value: &str) -> Result<()> {
        self.store
            .insert(GridKey::new(namespace, option), value.to_string());

        ::tracing::info!("Grid configuration updated");
        Ok(())
    }

    #[::tracing::instrument(skip(self))]
    async fn seed(&self, namespace: &str, option: &str, value: &str) -> Result<bool> {
        let mut inserted = false;

        self.store
            .entry(GridKey::new(namespace, option))
            .or_insert_with(|| {
                inserted = true;
                value.to_string()
            });

        Ok(inserted)
    }

    async fn entries(&self, namespace: &str) -> Result<Vec<GridConfigurationEntry>> {
        let mut entries: Vec<GridConfigurationEntry> = self
            .store
            .iter()
            .filter(|entry| entry.key().namespace == namespace)
            .map(|entry| GridConfigurationEntry {
                namespace: entry.key().namespace.clone(),
                option: entry.key().option.clone(),
                value: entry.value().clone(),
            })
            .collect();

        entries.sort_by(|a, b| a.option.cmp(&b.option));

        Ok(entries)
    }
}
