use crate::shared::core::table::Table;
use crate::shared::infrastructure::table_store::in_memory::InMemoryTableStore;

/// Roster sheet with the default `ID_Turno` / `Disp` headers.
pub struct RosterBuilder {
    rows: Vec<Vec<String>>,
}

impl Default for RosterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RosterBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn shift(mut self, id: &str, capacity: &str) -> Self {
        self.rows.push(vec![id.to_string(), capacity.to_string()]);
        self
    }

    pub fn table(self) -> Table {
        let mut table = Table::new(["ID_Turno", "Disp"]);
        for row in self.rows {
            table.push_row(row);
        }
        table
    }

    pub fn store(self) -> InMemoryTableStore {
        InMemoryTableStore::with_table(self.table())
    }
}
