use crate::modules::shifts::core::roster::RosterLayout;
use crate::modules::shifts::use_cases::list_available_slots::handler::AvailabilityLoader;
use crate::modules::shifts::use_cases::list_registrations::handler::RegistrationsQuery;
use crate::modules::shifts::use_cases::register_volunteer::decide::SignUpPolicy;
use crate::modules::shifts::use_cases::register_volunteer::handler::RegisterVolunteerHandler;
use crate::modules::shifts::use_cases::sign_up_page::handler::SignUpPageHandler;
use crate::shared::infrastructure::table_store::TableStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub availability: Arc<AvailabilityLoader>,
    pub registrations: Arc<RegistrationsQuery>,
    pub register_handler: Arc<RegisterVolunteerHandler>,
    pub page_handler: Arc<SignUpPageHandler>,
}

impl AppState {
    pub fn new(
        title: impl Into<String>,
        policy: SignUpPolicy,
        layout: RosterLayout,
        roster: Arc<dyn TableStore>,
        registrations: Arc<dyn TableStore>,
    ) -> Self {
        let availability = Arc::new(AvailabilityLoader::new(roster, layout));
        let query = Arc::new(RegistrationsQuery::new(registrations.clone()));
        let register_handler = Arc::new(RegisterVolunteerHandler::new(
            policy,
            availability.clone(),
            registrations,
        ));
        let page_handler = Arc::new(SignUpPageHandler::new(
            title,
            availability.clone(),
            query.clone(),
            register_handler.clone(),
        ));

        Self {
            availability,
            registrations: query,
            register_handler,
            page_handler,
        }
    }
}
