// CSV text <-> Table, shared by the file-backed stores.

use crate::shared::core::table::Table;
use crate::shared::infrastructure::table_store::TableStoreError;
use csv::{ReaderBuilder, WriterBuilder};

pub fn parse_csv(text: &str) -> Result<Table, TableStoreError> {
    if text.trim().is_empty() {
        return Ok(Table::default());
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| TableStoreError::Malformed(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| TableStoreError::Malformed(e.to_string()))?;
        table.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

pub fn write_csv(table: &Table) -> Result<String, TableStoreError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(table.headers())
        .map_err(|e| TableStoreError::Malformed(e.to_string()))?;
    for row in table.rows() {
        writer
            .write_record(row)
            .map_err(|e| TableStoreError::Malformed(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TableStoreError::Malformed(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TableStoreError::Malformed(e.to_string()))
}
