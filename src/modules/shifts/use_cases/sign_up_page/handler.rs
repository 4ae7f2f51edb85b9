// One full page cycle per request: load availability, pick the day, list its
// slots and registrations, and on submit run the registration in between.

use crate::modules::shifts::core::shift::format_date;
use crate::modules::shifts::core::slots::{Slot, available_dates, parse_user_date, slots_for_date};
use crate::modules::shifts::use_cases::errors::ApplicationError;
use crate::modules::shifts::use_cases::list_available_slots::handler::AvailabilityLoader;
use crate::modules::shifts::use_cases::list_registrations::handler::{
    BandRegistrations, RegistrationsQuery,
};
use crate::modules::shifts::use_cases::register_volunteer::command::RegisterVolunteer;
use crate::modules::shifts::use_cases::register_volunteer::decision::DecideError;
use crate::modules::shifts::use_cases::register_volunteer::handler::RegisterVolunteerHandler;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::sync::Arc;

/// Values posted by the sign-up form. Missing fields arrive as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoShiftsAvailable,
    NoShiftsThisDay,
    Invalid(DecideError),
    Registered { name: String, shift: String },
    ReadError(String),
    WriteError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpPage {
    pub title: String,
    pub require_email: bool,
    pub notices: Vec<Notice>,
    pub show_form: bool,
    pub dates: Vec<NaiveDate>,
    pub selected_date: Option<NaiveDate>,
    pub slots: Vec<Slot>,
    pub registrations: Vec<BandRegistrations>,
    pub form: SignUpForm,
}

pub struct SignUpPageHandler {
    title: String,
    availability: Arc<AvailabilityLoader>,
    registrations: Arc<RegistrationsQuery>,
    register_handler: Arc<RegisterVolunteerHandler>,
}

impl SignUpPageHandler {
    pub fn new(
        title: impl Into<String>,
        availability: Arc<AvailabilityLoader>,
        registrations: Arc<RegistrationsQuery>,
        register_handler: Arc<RegisterVolunteerHandler>,
    ) -> Self {
        Self {
            title: title.into(),
            availability,
            registrations,
            register_handler,
        }
    }

    pub async fn show(&self, date: Option<&str>) -> SignUpPage {
        let form = SignUpForm {
            date: date.unwrap_or_default().to_string(),
            ..SignUpForm::default()
        };
        self.render(form, Vec::new()).await
    }

    pub async fn submit(&self, form: SignUpForm, submitted_at: NaiveDateTime) -> SignUpPage {
        let email = form.email.trim();
        let command = RegisterVolunteer {
            volunteer_name: form.name.clone(),
            volunteer_email: (!email.is_empty()).then(|| email.to_string()),
            shift_reference: form.shift.clone(),
            submitted_at,
        };

        let (notice, form) = match self.register_handler.handle(command).await {
            Ok(registration) => (
                Notice::Registered {
                    name: registration.volunteer_name,
                    shift: registration.shift_reference.to_string(),
                },
                // Keep the day, clear the identity for the next sign-up.
                SignUpForm {
                    date: form.date,
                    ..SignUpForm::default()
                },
            ),
            Err(ApplicationError::Validation(reason)) => (Notice::Invalid(reason), form),
            Err(ApplicationError::SourceUnreachable(e)) => (Notice::ReadError(e.to_string()), form),
            Err(ApplicationError::WriteFailure(e)) => (Notice::WriteError(e.to_string()), form),
        };
        self.render(form, vec![notice]).await
    }

    async fn render(&self, form: SignUpForm, mut notices: Vec<Notice>) -> SignUpPage {
        let mut page = SignUpPage {
            title: self.title.clone(),
            require_email: self.register_handler.policy().require_email,
            notices: Vec::new(),
            show_form: false,
            dates: Vec::new(),
            selected_date: None,
            slots: Vec::new(),
            registrations: Vec::new(),
            form,
        };

        let open = match self.availability.open_shifts().await {
            Ok(open) => open,
            Err(e) => {
                let message = match e {
                    ApplicationError::SourceUnreachable(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                if !notices.iter().any(|n| matches!(n, Notice::ReadError(_))) {
                    notices.push(Notice::ReadError(message));
                }
                page.notices = notices;
                return page;
            }
        };
        page.dates = available_dates(&open);
        if open.is_empty() {
            notices.push(Notice::NoShiftsAvailable);
            page.notices = notices;
            return page;
        }
        let Some(selected) = parse_user_date(&page.form.date).or_else(|| page.dates.first().copied())
        else {
            notices.push(Notice::NoShiftsAvailable);
            page.notices = notices;
            return page;
        };
        page.selected_date = Some(selected);
        page.form.date = format_date(selected);
        page.slots = slots_for_date(&open, selected);
        if page.slots.is_empty() {
            notices.push(Notice::NoShiftsThisDay);
        }
        page.show_form = true;
        page.registrations = self.registrations.grouped_for_date(selected).await;
        page.notices = notices;
        page
    }
}
