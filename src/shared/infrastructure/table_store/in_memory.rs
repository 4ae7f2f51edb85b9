// In memory implementation of the TableStore port.
//
// Purpose
// - Support handler and HTTP tests and local development without a backend.
//
// Responsibilities
// - Hold one table and a monotonically increasing revision.
// - Simulate outages, rejected writes, a missing table and slow writers.
// - Optionally enforce revisions the way the version-controlled file store does.

use crate::shared::core::table::Table;
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError, VersionedTable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryTableStore {
    inner: RwLock<Option<(Table, u64)>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
    is_offline: bool,
    is_read_only: bool,
    strict_revisions: bool,
    delay_save_ms: u64,
}

impl InMemoryTableStore {
    /// A store whose table does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Table) -> Self {
        Self {
            inner: RwLock::new(Some((table, 1))),
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn toggle_read_only(&mut self) {
        self.is_read_only = !self.is_read_only;
    }

    pub fn enforce_revisions(&mut self) {
        self.strict_revisions = true;
    }

    pub fn set_delay_save_ms(&mut self, ms: u64) {
        self.delay_save_ms = ms;
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Option<Table> {
        self.inner.read().await.as_ref().map(|(t, _)| t.clone())
    }
}

#[async_trait::async_trait]
impl TableStore for InMemoryTableStore {
    async fn load(&self) -> Result<VersionedTable, TableStoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.is_offline {
            return Err(TableStoreError::Backend("Table store offline".into()));
        }
        match self.inner.read().await.as_ref() {
            Some((table, revision)) => Ok(VersionedTable {
                table: table.clone(),
                revision: Some(revision.to_string()),
            }),
            None => Err(TableStoreError::NotFound("in-memory table".into())),
        }
    }

    async fn save(
        &self,
        table: &Table,
        expected_revision: Option<&str>,
    ) -> Result<(), TableStoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.is_offline {
            return Err(TableStoreError::Backend("Table store offline".into()));
        }
        if self.is_read_only {
            return Err(TableStoreError::Backend("Table store is read only".into()));
        }
        if self.delay_save_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_save_ms)).await;
        }

        let mut guard = self.inner.write().await;
        let current = guard.as_ref().map(|(_, r)| *r);
        if self.strict_revisions {
            let actual = current.map(|r| r.to_string());
            if expected_revision.map(str::to_string) != actual {
                return Err(TableStoreError::RevisionConflict(format!(
                    "expected {}, actual {}",
                    expected_revision.unwrap_or("none"),
                    actual.as_deref().unwrap_or("none")
                )));
            }
        }
        *guard = Some((table.clone(), current.unwrap_or(0) + 1));
        Ok(())
    }
}
