use crate::modules::shifts::core::registration::Registration;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DecideError {
    #[error("volunteer name is required")]
    MissingName,

    #[error("volunteer email is required")]
    MissingEmail,

    #[error("invalid shift reference: {0}")]
    InvalidShiftReference(String),

    #[error("shift {0} has no places left")]
    ShiftUnavailable(String),
}

pub enum Decision {
    Accepted { registration: Registration },
    Rejected { reason: DecideError },
}
