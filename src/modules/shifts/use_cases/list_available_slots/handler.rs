// Availability loader: roster store -> open shifts -> slots for a day.

use crate::modules::shifts::core::roster::{RosterLayout, open_shifts};
use crate::modules::shifts::core::shift::Shift;
use crate::modules::shifts::core::slots::{Slot, available_dates, slots_for_date};
use crate::modules::shifts::use_cases::errors::ApplicationError;
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct AvailabilityLoader {
    roster: Arc<dyn TableStore>,
    layout: RosterLayout,
}

impl AvailabilityLoader {
    pub fn new(roster: Arc<dyn TableStore>, layout: RosterLayout) -> Self {
        Self { roster, layout }
    }

    /// Any roster that cannot be read, including one without the configured
    /// columns, is reported as unreachable.
    pub async fn open_shifts(&self) -> Result<Vec<Shift>, ApplicationError> {
        let loaded = self.roster.load().await.map_err(|e| {
            tracing::warn!(error = %e, "roster read failed");
            ApplicationError::SourceUnreachable(e)
        })?;
        open_shifts(&loaded.table, &self.layout).map_err(|e| {
            tracing::warn!(error = %e, "roster layout mismatch");
            ApplicationError::SourceUnreachable(TableStoreError::Malformed(e.to_string()))
        })
    }

    pub async fn available_dates(&self) -> Result<Vec<NaiveDate>, ApplicationError> {
        Ok(available_dates(&self.open_shifts().await?))
    }

    pub async fn slots_for(&self, date: NaiveDate) -> Result<Vec<Slot>, ApplicationError> {
        Ok(slots_for_date(&self.open_shifts().await?, date))
    }

    pub async fn invalidate(&self) {
        self.roster.invalidate().await;
    }
}
