// TableStore backed by a CSV file on the local filesystem.
//
// No revision tracking: a save overwrites the file, last writer wins.

use crate::shared::core::table::Table;
use crate::shared::infrastructure::table_store::csv_codec::{parse_csv, write_csv};
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError, VersionedTable};
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvFileTableStore {
    path: PathBuf,
}

impl CsvFileTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl TableStore for CsvFileTableStore {
    async fn load(&self) -> Result<VersionedTable, TableStoreError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => TableStoreError::NotFound(self.path.display().to_string()),
                _ => TableStoreError::Backend(format!("{}: {e}", self.path.display())),
            })?;
        Ok(VersionedTable::unversioned(parse_csv(&text)?))
    }

    async fn save(
        &self,
        table: &Table,
        _expected_revision: Option<&str>,
    ) -> Result<(), TableStoreError> {
        let text = write_csv(table)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TableStoreError::Backend(e.to_string()))?;
        }
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| TableStoreError::Backend(format!("{}: {e}", self.path.display())))
    }
}
