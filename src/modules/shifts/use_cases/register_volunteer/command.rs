use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterVolunteer {
    pub volunteer_name: String,
    pub volunteer_email: Option<String>,
    pub shift_reference: String,
    pub submitted_at: NaiveDateTime,
}
