// A volunteer's claim on one shift, and its row shape in the registrations store.

use crate::modules::shifts::core::shift::ShiftId;
use crate::shared::core::table::Table;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

pub const VOLUNTEER_COLUMN: &str = "Volunteer";
pub const SHIFT_REFERENCE_COLUMN: &str = "Shift_Reference";
pub const EMAIL_COLUMN: &str = "Email";
pub const SUBMITTED_AT_COLUMN: &str = "Submitted_At";
pub const SUBMITTED_AT_FORMAT: &str = "%d/%m/%Y %H:%M";

pub const REGISTRATION_COLUMNS: [&str; 4] = [
    VOLUNTEER_COLUMN,
    SHIFT_REFERENCE_COLUMN,
    EMAIL_COLUMN,
    SUBMITTED_AT_COLUMN,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub volunteer_name: String,
    pub volunteer_email: Option<String>,
    pub shift_reference: ShiftId,
    pub submitted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationTableError {
    #[error("registrations table has no column named {0:?}")]
    MissingColumn(&'static str),
}

impl Registration {
    pub fn to_record(&self) -> Vec<(&'static str, String)> {
        vec![
            (VOLUNTEER_COLUMN, self.volunteer_name.clone()),
            (SHIFT_REFERENCE_COLUMN, self.shift_reference.to_string()),
            (EMAIL_COLUMN, self.volunteer_email.clone().unwrap_or_default()),
            (
                SUBMITTED_AT_COLUMN,
                self.submitted_at
                    .map(|t| t.format(SUBMITTED_AT_FORMAT).to_string())
                    .unwrap_or_default(),
            ),
        ]
    }

    /// Decode every row of a registrations table. Rows whose shift reference
    /// does not parse are skipped; email and timestamp columns are optional.
    pub fn from_table(table: &Table) -> Result<Vec<Registration>, RegistrationTableError> {
        let name_idx = table
            .column_index(VOLUNTEER_COLUMN)
            .ok_or(RegistrationTableError::MissingColumn(VOLUNTEER_COLUMN))?;
        let shift_idx = table
            .column_index(SHIFT_REFERENCE_COLUMN)
            .ok_or(RegistrationTableError::MissingColumn(SHIFT_REFERENCE_COLUMN))?;
        let email_idx = table.column_index(EMAIL_COLUMN);
        let submitted_idx = table.column_index(SUBMITTED_AT_COLUMN);

        Ok(table
            .rows()
            .iter()
            .filter_map(|row| {
                let shift_reference = ShiftId::parse(&row[shift_idx]).ok()?;
                Some(Registration {
                    volunteer_name: row[name_idx].trim().to_string(),
                    volunteer_email: email_idx
                        .map(|i| row[i].trim().to_string())
                        .filter(|e| !e.is_empty()),
                    shift_reference,
                    submitted_at: submitted_idx.and_then(|i| {
                        NaiveDateTime::parse_from_str(row[i].trim(), SUBMITTED_AT_FORMAT).ok()
                    }),
                })
            })
            .collect())
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.shift_reference.is_on(date)
    }
}

/// A registrations table with the canonical header row and no data.
pub fn empty_registrations_table() -> Table {
    Table::new(REGISTRATION_COLUMNS)
}

#[cfg(test)]
mod registration_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registration() -> Registration {
        Registration {
            volunteer_name: "Maria Rossi".into(),
            volunteer_email: Some("maria@example.org".into()),
            shift_reference: ShiftId::parse("12/05/2026_08-14").unwrap(),
            submitted_at: NaiveDate::from_ymd_opt(2026, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0),
        }
    }

    #[rstest]
    fn it_should_write_the_record_in_store_format(registration: Registration) {
        let mut table = empty_registrations_table();
        table.append_record(&registration.to_record());
        assert_eq!(
            table.rows()[0],
            ["Maria Rossi", "12/05/2026_08-14", "maria@example.org", "01/05/2026 09:30"]
        );
    }

    #[rstest]
    fn it_should_read_back_what_it_wrote(registration: Registration) {
        let mut table = empty_registrations_table();
        table.append_record(&registration.to_record());
        assert_eq!(Registration::from_table(&table).unwrap(), vec![registration]);
    }

    #[rstest]
    fn it_should_read_rows_without_optional_columns() {
        let mut table = Table::new(["Shift_Reference", "Volunteer"]);
        table.push_row(vec!["12/05/2026_08-14".into(), " Luca Bianchi ".into()]);
        table.push_row(vec!["not-a-shift".into(), "Ignored".into()]);
        let registrations = Registration::from_table(&table).unwrap();
        assert_eq!(registrations.len(), 1);
        assert_eq!(registrations[0].volunteer_name, "Luca Bianchi");
        assert_eq!(registrations[0].volunteer_email, None);
        assert_eq!(registrations[0].submitted_at, None);
    }

    #[rstest]
    fn it_should_fail_without_the_volunteer_column() {
        let table = Table::new(["Shift_Reference"]);
        assert_eq!(
            Registration::from_table(&table),
            Err(RegistrationTableError::MissingColumn(VOLUNTEER_COLUMN))
        );
    }
}
