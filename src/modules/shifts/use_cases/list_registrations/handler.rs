// Roster display: committed registrations for one day.
//
// Reading is best effort. A missing, unreachable or malformed store yields an
// empty list so the page still renders.

use crate::modules::shifts::core::registration::Registration;
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// What other volunteers may see of a registration. The email stays in the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicRegistration {
    pub volunteer_name: String,
    pub shift_reference: String,
    pub time_band: String,
}

impl From<Registration> for PublicRegistration {
    fn from(r: Registration) -> Self {
        Self {
            volunteer_name: r.volunteer_name,
            time_band: r.shift_reference.band_label().to_string(),
            shift_reference: r.shift_reference.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandRegistrations {
    pub time_band: String,
    pub volunteers: Vec<Registration>,
}

pub struct RegistrationsQuery {
    registrations: Arc<dyn TableStore>,
}

impl RegistrationsQuery {
    pub fn new(registrations: Arc<dyn TableStore>) -> Self {
        Self { registrations }
    }

    pub async fn for_date(&self, date: NaiveDate) -> Vec<Registration> {
        let table = match self.registrations.load().await {
            Ok(loaded) => loaded.table,
            Err(TableStoreError::NotFound(_)) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "registrations read failed");
                return Vec::new();
            }
        };
        if table.headers().is_empty() {
            return Vec::new();
        }
        match Registration::from_table(&table) {
            Ok(all) => all.into_iter().filter(|r| r.is_on(date)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "registrations table malformed");
                Vec::new()
            }
        }
    }

    pub async fn public_for_date(&self, date: NaiveDate) -> Vec<PublicRegistration> {
        self.for_date(date).await.into_iter().map(Into::into).collect()
    }

    /// Registrations for `date` grouped by time band, bands in display order.
    pub async fn grouped_for_date(&self, date: NaiveDate) -> Vec<BandRegistrations> {
        let mut registrations = self.for_date(date).await;
        registrations.sort_by_key(|r| r.shift_reference.time_band());

        let mut groups: Vec<BandRegistrations> = Vec::new();
        for registration in registrations {
            let band = registration.shift_reference.band_label().to_string();
            match groups.last_mut() {
                Some(group) if group.time_band == band => group.volunteers.push(registration),
                _ => groups.push(BandRegistrations {
                    time_band: band,
                    volunteers: vec![registration],
                }),
            }
        }
        groups
    }
}
