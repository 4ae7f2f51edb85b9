use crate::modules::shifts::core::registration::Registration;
use crate::modules::shifts::core::shift::{Shift, ShiftId};
use crate::modules::shifts::use_cases::register_volunteer::{
    command::RegisterVolunteer,
    decision::{DecideError, Decision},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignUpPolicy {
    pub require_email: bool,
}

impl Default for SignUpPolicy {
    fn default() -> Self {
        Self {
            require_email: true,
        }
    }
}

/// Field checks that need no external state.
pub fn validate(policy: &SignUpPolicy, command: &RegisterVolunteer) -> Result<(), DecideError> {
    if command.volunteer_name.trim().is_empty() {
        return Err(DecideError::MissingName);
    }
    let email = command.volunteer_email.as_deref().map(str::trim).unwrap_or("");
    if policy.require_email && email.is_empty() {
        return Err(DecideError::MissingEmail);
    }
    ShiftId::parse(&command.shift_reference)
        .map_err(|e| DecideError::InvalidShiftReference(e.to_string()))?;
    Ok(())
}

/// Accept the sign-up when the fields are valid and the shift is still among
/// the open ones. Capacity is not decremented here.
pub fn decide_register(
    policy: &SignUpPolicy,
    open_shifts: &[Shift],
    command: RegisterVolunteer,
) -> Decision {
    if let Err(reason) = validate(policy, &command) {
        return Decision::Rejected { reason };
    }
    let Some(shift) = open_shifts
        .iter()
        .find(|s| s.id.to_string() == command.shift_reference.trim())
    else {
        return Decision::Rejected {
            reason: DecideError::ShiftUnavailable(command.shift_reference.trim().to_string()),
        };
    };

    let email = command
        .volunteer_email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    Decision::Accepted {
        registration: Registration {
            volunteer_name: command.volunteer_name.trim().to_string(),
            volunteer_email: email,
            shift_reference: shift.id.clone(),
            submitted_at: Some(command.submitted_at),
        },
    }
}
