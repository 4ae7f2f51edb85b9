// TableStore backed by one worksheet of a Google spreadsheet (Sheets API v4).
//
// A save writes the full table over the worksheet first and only then clears
// whatever lies below the last written row, so a failed write leaves the old
// rows in place. The API offers no revision handle for values, so concurrent
// saves race and the last one wins.

use crate::shared::core::table::Table;
use crate::shared::infrastructure::table_store::google_auth::AccessTokenSource;
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError, VersionedTable};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const SHEETS_API: &str = "https://sheets.googleapis.com";

#[derive(Clone)]
pub struct GoogleSheetsTableStore {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    tokens: Arc<dyn AccessTokenSource>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

impl GoogleSheetsTableStore {
    pub fn new(
        client: Client,
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            client,
            base_url: SHEETS_API.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
            tokens,
        }
    }

    /// Point the store at another API host, e.g. a local stand-in.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn values_url(&self, suffix: &str) -> Result<Url, TableStoreError> {
        self.range_url(&self.worksheet, suffix)
    }

    fn range_url(&self, range: &str, suffix: &str) -> Result<Url, TableStoreError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| TableStoreError::Backend(e.to_string()))?;
        let range = format!("{range}{suffix}");
        url.path_segments_mut()
            .map_err(|_| TableStoreError::Backend("invalid sheets base url".into()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        Ok(url)
    }

    /// Rows from `first_row` (1-based) down, in A1 notation.
    fn tail_range(&self, first_row: usize) -> String {
        format!("'{}'!A{first_row}:ZZ", self.worksheet.replace('\'', "''"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, TableStoreError> {
        let token = self.tokens.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| TableStoreError::Backend(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body, &self.worksheet));
        }
        Ok(response)
    }
}

/// Spreadsheet cells arrive as formatted strings, but be lenient with numbers
/// and booleans in case the render option changes.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn table_from_values(values: Vec<Vec<Value>>) -> Table {
    Table::from_rows(
        values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect(),
    )
}

fn map_status(status: StatusCode, body: String, worksheet: &str) -> TableStoreError {
    match status {
        StatusCode::NOT_FOUND => TableStoreError::NotFound(worksheet.to_string()),
        // A missing worksheet is reported as an unparsable range.
        StatusCode::BAD_REQUEST if body.contains("Unable to parse range") => {
            TableStoreError::NotFound(worksheet.to_string())
        }
        _ => TableStoreError::Backend(format!("sheets api returned {status}: {body}")),
    }
}

#[async_trait::async_trait]
impl TableStore for GoogleSheetsTableStore {
    async fn load(&self) -> Result<VersionedTable, TableStoreError> {
        let response = self.send(self.client.get(self.values_url("")?)).await?;
        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| TableStoreError::Malformed(e.to_string()))?;
        Ok(VersionedTable::unversioned(table_from_values(range.values)))
    }

    async fn save(
        &self,
        table: &Table,
        _expected_revision: Option<&str>,
    ) -> Result<(), TableStoreError> {
        let rows = table.to_rows();
        let written = rows.len();

        let mut url = self.values_url("")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = ValueRangeBody {
            range: &self.worksheet,
            major_dimension: "ROWS",
            values: rows,
        };
        self.send(self.client.put(url).json(&body)).await?;

        // The table is stored at this point; a failed trim is logged, not
        // reported.
        let tail = self.tail_range(written + 1);
        let clear = self
            .client
            .post(self.range_url(&tail, ":clear")?)
            .json(&serde_json::json!({}));
        if let Err(e) = self.send(clear).await {
            tracing::warn!(worksheet = %self.worksheet, error = %e, "stale rows below the table were not cleared");
        }
        tracing::debug!(worksheet = %self.worksheet, rows = table.len(), "worksheet overwritten");
        Ok(())
    }
}

#[cfg(test)]
mod google_sheets_table_store_tests {
    use super::*;
    use crate::shared::infrastructure::table_store::google_auth::StaticToken;
    use axum::{
        Json, Router,
        extract::{Path, State},
        http::HeaderMap,
        routing::get,
    };
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tokio::sync::Mutex;

    fn store() -> GoogleSheetsTableStore {
        GoogleSheetsTableStore::new(
            Client::new(),
            "sheet-123",
            "Turni Master",
            Arc::new(StaticToken::new("token")),
        )
    }

    // Local stand-in for the values endpoints of one worksheet.
    #[derive(Default)]
    struct FakeSheet {
        rows: Vec<Vec<String>>,
        fail_writes: bool,
        calls: Vec<String>,
        tokens: Vec<String>,
    }

    type SharedSheet = Arc<Mutex<FakeSheet>>;

    fn bearer(headers: &HeaderMap) -> String {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn read_values(
        State(sheet): State<SharedSheet>,
        headers: HeaderMap,
        Path((_, range)): Path<(String, String)>,
    ) -> Json<Value> {
        let mut sheet = sheet.lock().await;
        sheet.tokens.push(bearer(&headers));
        sheet.calls.push(format!("GET {range}"));
        Json(json!({ "range": range, "majorDimension": "ROWS", "values": sheet.rows }))
    }

    async fn write_values(
        State(sheet): State<SharedSheet>,
        headers: HeaderMap,
        Path((_, range)): Path<(String, String)>,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, StatusCode> {
        let mut sheet = sheet.lock().await;
        sheet.tokens.push(bearer(&headers));
        sheet.calls.push(format!("PUT {range}"));
        if sheet.fail_writes {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        let rows: Vec<Vec<String>> =
            serde_json::from_value(body["values"].clone()).map_err(|_| StatusCode::BAD_REQUEST)?;
        // Cells past the written block keep their old values.
        for (i, row) in rows.into_iter().enumerate() {
            if i < sheet.rows.len() {
                sheet.rows[i] = row;
            } else {
                sheet.rows.push(row);
            }
        }
        Ok(Json(json!({})))
    }

    async fn clear_values(
        State(sheet): State<SharedSheet>,
        headers: HeaderMap,
        Path((_, range)): Path<(String, String)>,
    ) -> Json<Value> {
        let mut sheet = sheet.lock().await;
        sheet.tokens.push(bearer(&headers));
        sheet.calls.push(format!("POST {range}"));
        let target = range.trim_end_matches(":clear");
        let first_row = target
            .rsplit_once('!')
            .and_then(|(_, cells)| cells.trim_start_matches('A').split(':').next())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(1);
        sheet.rows.truncate(first_row.saturating_sub(1));
        Json(json!({}))
    }

    async fn serve(sheet: SharedSheet) -> String {
        let app = Router::new()
            .route(
                "/v4/spreadsheets/{id}/values/{range}",
                get(read_values).put(write_values).post(clear_values),
            )
            .with_state(sheet);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn rows(values: &[&[&str]]) -> Vec<Vec<String>> {
        values
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    async fn served_store(sheet: SharedSheet) -> GoogleSheetsTableStore {
        let base_url = serve(sheet).await;
        GoogleSheetsTableStore::new(
            Client::new(),
            "sheet-123",
            "Iscrizioni",
            Arc::new(StaticToken::new("token")),
        )
        .with_base_url(base_url)
    }

    #[fixture]
    fn existing() -> Vec<Vec<String>> {
        rows(&[
            &["Volunteer", "Shift_Reference"],
            &["Maria Rossi", "12/05/2026_08-14"],
            &["Luca Bianchi", "12/05/2026_14-18"],
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_the_old_rows_when_the_write_fails(existing: Vec<Vec<String>>) {
        let sheet = Arc::new(Mutex::new(FakeSheet {
            rows: existing.clone(),
            fail_writes: true,
            ..FakeSheet::default()
        }));
        let store = served_store(sheet.clone()).await;

        let mut table = Table::from_rows(existing.clone());
        table.push_row(vec!["Anna Verdi".into(), "13/05/2026_08-14".into()]);
        let result = store.save(&table, None).await;

        assert!(matches!(result, Err(TableStoreError::Backend(_))));
        let sheet = sheet.lock().await;
        assert_eq!(sheet.rows, existing);
        assert_eq!(sheet.calls, ["PUT Iscrizioni"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_write_first_and_then_clear_only_below_the_table(
        existing: Vec<Vec<String>>,
    ) {
        let sheet = Arc::new(Mutex::new(FakeSheet {
            rows: existing,
            ..FakeSheet::default()
        }));
        let store = served_store(sheet.clone()).await;

        let table = Table::from_rows(rows(&[
            &["Volunteer", "Shift_Reference"],
            &["Anna Verdi", "13/05/2026_08-14"],
        ]));
        store.save(&table, None).await.unwrap();

        let sheet = sheet.lock().await;
        assert_eq!(sheet.calls, ["PUT Iscrizioni", "POST 'Iscrizioni'!A3:ZZ:clear"]);
        assert_eq!(sheet.rows, table.to_rows());
        assert!(sheet.tokens.iter().all(|t| t == "Bearer token"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_load_what_was_saved(existing: Vec<Vec<String>>) {
        let sheet = Arc::new(Mutex::new(FakeSheet::default()));
        let store = served_store(sheet.clone()).await;

        let mut table = Table::from_rows(existing);
        table.push_row(vec!["Anna Verdi".into(), "13/05/2026_08-14".into()]);
        store.save(&table, None).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.table, table);
        assert_eq!(loaded.revision, None);
    }

    #[rstest]
    fn it_should_quote_the_worksheet_in_the_tail_range() {
        assert_eq!(store().tail_range(5), "'Turni Master'!A5:ZZ");
    }

    #[rstest]
    fn it_should_build_an_escaped_values_url() {
        let url = store().values_url("").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Turni%20Master"
        );
    }

    #[rstest]
    fn it_should_append_the_clear_verb_to_the_range() {
        let store = store();
        let url = store.range_url(&store.tail_range(3), ":clear").unwrap();
        assert!(url.as_str().ends_with("/values/'Turni%20Master'!A3:ZZ:clear"));
    }

    #[rstest]
    fn it_should_convert_ragged_values_into_a_table() {
        let range: ValueRange = serde_json::from_value(json!({
            "range": "Turni_Master!A1:B3",
            "majorDimension": "ROWS",
            "values": [["ID_Turno", "Disp"], ["10/02/2026_00-08", 2], ["10/02/2026_08-14"]]
        }))
        .unwrap();
        let table = table_from_values(range.values);
        assert_eq!(table.headers(), ["ID_Turno", "Disp"]);
        assert_eq!(table.rows()[0], ["10/02/2026_00-08", "2"]);
        assert_eq!(table.rows()[1], ["10/02/2026_08-14", ""]);
    }

    #[rstest]
    fn it_should_read_an_empty_worksheet_as_an_empty_table() {
        let range: ValueRange =
            serde_json::from_value(json!({ "range": "Iscrizioni!A1:Z1000" })).unwrap();
        assert_eq!(table_from_values(range.values), Table::default());
    }

    #[rstest]
    #[case(StatusCode::NOT_FOUND, "", true)]
    #[case(StatusCode::BAD_REQUEST, "Unable to parse range: Iscrizioni", true)]
    #[case(StatusCode::FORBIDDEN, "The caller does not have permission", false)]
    fn it_should_map_error_statuses(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] not_found: bool,
    ) {
        let err = map_status(status, body.to_string(), "Iscrizioni");
        assert_eq!(matches!(err, TableStoreError::NotFound(_)), not_found);
    }
}
