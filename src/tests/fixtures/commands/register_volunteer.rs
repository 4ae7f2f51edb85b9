// Shared test fixture for the RegisterVolunteer command.

use crate::modules::shifts::use_cases::register_volunteer::command::RegisterVolunteer;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;

const FIXTURE_PATH: &str = "./src/tests/fixtures/commands/json/register_volunteer.json";

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterVolunteerDto {
    pub volunteer_name: String,
    pub volunteer_email: Option<String>,
    pub shift_reference: String,
}

pub struct RegisterVolunteerBuilder {
    inner: RegisterVolunteer,
}

impl Default for RegisterVolunteerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RegisterVolunteerBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string(FIXTURE_PATH).unwrap();
        let dto: RegisterVolunteerDto = serde_json::from_str(&json_str).unwrap();

        Self {
            inner: RegisterVolunteer {
                volunteer_name: dto.volunteer_name,
                volunteer_email: dto.volunteer_email,
                shift_reference: dto.shift_reference,
                submitted_at: NaiveDate::from_ymd_opt(2026, 5, 1)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap(),
            },
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.volunteer_name = v.into();
        self
    }

    pub fn email(mut self, v: Option<&str>) -> Self {
        self.inner.volunteer_email = v.map(str::to_string);
        self
    }

    pub fn shift(mut self, v: impl Into<String>) -> Self {
        self.inner.shift_reference = v.into();
        self
    }

    pub fn build(self) -> RegisterVolunteer {
        self.inner
    }
}

#[cfg(test)]
mod register_volunteer_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = RegisterVolunteerBuilder::default().build();
        assert_eq!(built.volunteer_name, "Maria Rossi");
        assert_eq!(built.volunteer_email.as_deref(), Some("maria.rossi@example.org"));
        assert_eq!(built.shift_reference, "12/05/2026_08-14");
    }

    #[rstest]
    fn setters_override_fields() {
        let custom = RegisterVolunteerBuilder::new()
            .name("Luca Bianchi")
            .email(None)
            .shift("13/05/2026_20-24")
            .build();

        assert_eq!(custom.volunteer_name, "Luca Bianchi");
        assert_eq!(custom.volunteer_email, None);
        assert_eq!(custom.shift_reference, "13/05/2026_20-24");
    }
}
