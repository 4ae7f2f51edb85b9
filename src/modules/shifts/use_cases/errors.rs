use crate::modules::shifts::use_cases::register_volunteer::decision::DecideError;
use crate::shared::infrastructure::table_store::TableStoreError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("roster unavailable: {0}")]
    SourceUnreachable(TableStoreError),

    #[error("registration rejected: {0}")]
    Validation(#[from] DecideError),

    #[error("registration not saved: {0}")]
    WriteFailure(TableStoreError),
}

impl ApplicationError {
    pub fn is_revision_conflict(&self) -> bool {
        matches!(
            self,
            Self::WriteFailure(TableStoreError::RevisionConflict(_))
        )
    }
}
