// Read-through cache in front of another TableStore.
//
// A TTL of zero bypasses the cache entirely. Saves through the cache and
// explicit invalidations drop the cached entry. Fresh loads always go to the
// inner store and refresh the entry.

use crate::shared::core::table::Table;
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError, VersionedTable};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub struct CachedTableStore {
    name: String,
    inner: Arc<dyn TableStore>,
    ttl: Duration,
    entry: RwLock<Option<(Instant, VersionedTable)>>,
}

impl CachedTableStore {
    pub fn new(name: impl Into<String>, inner: Arc<dyn TableStore>, ttl: Duration) -> Self {
        Self {
            name: name.into(),
            inner,
            ttl,
            entry: RwLock::new(None),
        }
    }
}

#[async_trait::async_trait]
impl TableStore for CachedTableStore {
    async fn load(&self) -> Result<VersionedTable, TableStoreError> {
        if self.ttl.is_zero() {
            return self.inner.load().await;
        }
        {
            let guard = self.entry.read().await;
            if let Some((at, cached)) = guard.as_ref().filter(|(at, _)| at.elapsed() < self.ttl) {
                tracing::debug!(store = %self.name, age_ms = at.elapsed().as_millis() as u64, "serving cached table");
                return Ok(cached.clone());
            }
        }
        let fresh = self.inner.load().await?;
        *self.entry.write().await = Some((Instant::now(), fresh.clone()));
        Ok(fresh)
    }

    async fn load_fresh(&self) -> Result<VersionedTable, TableStoreError> {
        let fresh = self.inner.load_fresh().await?;
        if !self.ttl.is_zero() {
            *self.entry.write().await = Some((Instant::now(), fresh.clone()));
        }
        Ok(fresh)
    }

    async fn save(
        &self,
        table: &Table,
        expected_revision: Option<&str>,
    ) -> Result<(), TableStoreError> {
        let result = self.inner.save(table, expected_revision).await;
        if result.is_ok() {
            self.invalidate().await;
        }
        result
    }

    async fn invalidate(&self) {
        if self.entry.write().await.take().is_some() {
            tracing::debug!(store = %self.name, "cache invalidated");
        }
    }
}
