// Tabular data exchanged with every store (spreadsheet tabs, CSV files).
//
// Cells are kept as text. Typing happens in the shifts core, never here.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from raw rows where the first row holds the headers.
    /// Short rows are padded with empty cells, long rows are truncated.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0);
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Append one record given as `(column, value)` pairs.
    ///
    /// Columns unknown to the table are added at the end and existing rows get
    /// an empty cell for them, so records with differing shapes line up.
    pub fn append_record(&mut self, record: &[(&str, String)]) {
        for (column, _) in record {
            if self.column_index(column).is_none() {
                self.headers.push((*column).to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }
        let mut row = vec![String::new(); self.headers.len()];
        for (column, value) in record {
            if let Some(idx) = self.column_index(column) {
                row[idx] = value.clone();
            }
        }
        self.rows.push(row);
    }

    /// Header row followed by data rows, the shape spreadsheet APIs expect.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.headers.clone());
        out.extend(self.rows.iter().cloned());
        out
    }
}
