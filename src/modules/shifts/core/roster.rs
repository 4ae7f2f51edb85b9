// Roster table -> open shifts.

use crate::modules::shifts::core::shift::{Shift, ShiftId, coerce_capacity};
use crate::shared::core::table::Table;
use thiserror::Error;

pub const DEFAULT_ID_COLUMN: &str = "ID_Turno";
pub const DEFAULT_CAPACITY_COLUMN: &str = "Disp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterLayout {
    ByHeader {
        id_column: String,
        capacity_column: String,
    },
    /// Identifier in the first column, capacity in the second.
    Positional,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self::ByHeader {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            capacity_column: DEFAULT_CAPACITY_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster has no column named {0:?}")]
    MissingColumn(String),

    #[error("roster needs at least two columns, found {0}")]
    TooFewColumns(usize),
}

impl RosterLayout {
    fn columns(&self, table: &Table) -> Result<(usize, usize), RosterError> {
        match self {
            Self::ByHeader {
                id_column,
                capacity_column,
            } => {
                let id = table
                    .column_index(id_column)
                    .ok_or_else(|| RosterError::MissingColumn(id_column.clone()))?;
                let capacity = table
                    .column_index(capacity_column)
                    .ok_or_else(|| RosterError::MissingColumn(capacity_column.clone()))?;
                Ok((id, capacity))
            }
            Self::Positional if table.headers().len() >= 2 => Ok((0, 1)),
            Self::Positional => Err(RosterError::TooFewColumns(table.headers().len())),
        }
    }
}

/// Every roster row with a well-formed identifier, capacity normalized.
pub fn read_shifts(table: &Table, layout: &RosterLayout) -> Result<Vec<Shift>, RosterError> {
    let (id_idx, capacity_idx) = layout.columns(table)?;
    let shifts = table
        .rows()
        .iter()
        .filter_map(|row| match ShiftId::parse(&row[id_idx]) {
            Ok(id) => Some(Shift {
                id,
                capacity_remaining: coerce_capacity(&row[capacity_idx]),
            }),
            Err(e) => {
                if !row[id_idx].trim().is_empty() {
                    tracing::debug!(error = %e, "skipping roster row");
                }
                None
            }
        })
        .collect();
    Ok(shifts)
}

/// Shifts with at least one place left, in roster order.
pub fn open_shifts(table: &Table, layout: &RosterLayout) -> Result<Vec<Shift>, RosterError> {
    Ok(read_shifts(table, layout)?
        .into_iter()
        .filter(Shift::is_open)
        .collect())
}
