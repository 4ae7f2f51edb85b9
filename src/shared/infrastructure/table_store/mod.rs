// Port for every tabular store the service reads or writes.
//
// A load returns the whole table plus an optional revision handle. A save
// overwrites the whole table; backends that track revisions reject a save whose
// expected revision is stale, the others ignore it (last writer wins).

use crate::shared::core::table::Table;
use async_trait::async_trait;
use thiserror::Error;

pub mod cached;
pub mod csv_codec;
pub mod csv_file;
pub mod github_file;
pub mod google_auth;
pub mod google_sheets;
pub mod in_memory;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableStoreError {
    #[error("table not found: {0}")]
    NotFound(String),

    #[error("revision conflict: {0}")]
    RevisionConflict(String),

    #[error("malformed table: {0}")]
    Malformed(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionedTable {
    pub table: Table,
    pub revision: Option<String>,
}

impl VersionedTable {
    pub fn unversioned(table: Table) -> Self {
        Self {
            table,
            revision: None,
        }
    }
}

#[async_trait]
pub trait TableStore: Send + Sync {
    async fn load(&self) -> Result<VersionedTable, TableStoreError>;

    async fn save(
        &self,
        table: &Table,
        expected_revision: Option<&str>,
    ) -> Result<(), TableStoreError>;

    /// Read straight from the backend, skipping any cache. Read-modify-write
    /// callers use this so a save never builds on a stale copy.
    async fn load_fresh(&self) -> Result<VersionedTable, TableStoreError> {
        self.load().await
    }

    /// Drop any cached read. Stores without a cache have nothing to do.
    async fn invalidate(&self) {}
}
