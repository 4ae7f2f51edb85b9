// Registration command handler orchestrates the write flow.
//
// Responsibilities
// - Validate the submitted fields before touching any store.
// - Re-read the roster and let the decider check the shift is still open.
// - Load the registrations table, append one row and save it back with the
//   revision it was loaded at. The load bypasses any cache so the save never
//   overwrites rows written since the last cached read.
// - Drop cached reads once the write went through.

use crate::modules::shifts::core::registration::{Registration, empty_registrations_table};
use crate::modules::shifts::use_cases::errors::ApplicationError;
use crate::modules::shifts::use_cases::list_available_slots::handler::AvailabilityLoader;
use crate::modules::shifts::use_cases::register_volunteer::command::RegisterVolunteer;
use crate::modules::shifts::use_cases::register_volunteer::decide::{
    SignUpPolicy, decide_register, validate,
};
use crate::modules::shifts::use_cases::register_volunteer::decision::Decision;
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError, VersionedTable};
use std::sync::Arc;

pub struct RegisterVolunteerHandler {
    policy: SignUpPolicy,
    availability: Arc<AvailabilityLoader>,
    registrations: Arc<dyn TableStore>,
}

impl RegisterVolunteerHandler {
    pub fn new(
        policy: SignUpPolicy,
        availability: Arc<AvailabilityLoader>,
        registrations: Arc<dyn TableStore>,
    ) -> Self {
        Self {
            policy,
            availability,
            registrations,
        }
    }

    pub fn policy(&self) -> SignUpPolicy {
        self.policy
    }

    pub async fn handle(&self, command: RegisterVolunteer) -> Result<Registration, ApplicationError> {
        if let Err(reason) = validate(&self.policy, &command) {
            tracing::info!(%reason, "sign-up rejected");
            return Err(reason.into());
        }

        let open = self.availability.open_shifts().await?;
        let registration = match decide_register(&self.policy, &open, command) {
            Decision::Accepted { registration } => registration,
            Decision::Rejected { reason } => {
                tracing::info!(%reason, "sign-up rejected");
                return Err(reason.into());
            }
        };

        self.append(&registration).await.map_err(|e| {
            tracing::error!(error = %e, shift = %registration.shift_reference, "registration not saved");
            ApplicationError::WriteFailure(e)
        })?;

        self.availability.invalidate().await;
        self.registrations.invalidate().await;
        tracing::info!(
            shift = %registration.shift_reference,
            volunteer = %registration.volunteer_name,
            "volunteer registered"
        );
        Ok(registration)
    }

    async fn append(&self, registration: &Registration) -> Result<(), TableStoreError> {
        // A store that does not exist yet starts out empty; any other read
        // failure aborts the write.
        let loaded = match self.registrations.load_fresh().await {
            Ok(loaded) => loaded,
            Err(TableStoreError::NotFound(what)) => {
                tracing::info!(%what, "registrations table missing, creating it");
                VersionedTable::default()
            }
            Err(e) => return Err(e),
        };

        let mut table = if loaded.table.headers().len() < 2 {
            empty_registrations_table()
        } else {
            loaded.table
        };
        table.append_record(&registration.to_record());
        self.registrations
            .save(&table, loaded.revision.as_deref())
            .await
    }
}
