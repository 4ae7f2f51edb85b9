use std::sync::Arc;

use crate::modules::shifts::core::roster::RosterLayout;
use crate::modules::shifts::use_cases::register_volunteer::decide::SignUpPolicy;
use crate::modules::shifts::use_cases::sign_up_page::handler::SignUpPageHandler;
use crate::shared::infrastructure::table_store::in_memory::InMemoryTableStore;
use crate::shell::state::AppState;

pub const TEST_TITLE: &str = "Turni di prova";

pub fn make_test_state(roster: InMemoryTableStore, registrations: InMemoryTableStore) -> AppState {
    AppState::new(
        TEST_TITLE,
        SignUpPolicy::default(),
        RosterLayout::default(),
        Arc::new(roster),
        Arc::new(registrations),
    )
}

pub fn make_page_handler(
    roster: InMemoryTableStore,
    registrations: InMemoryTableStore,
) -> SignUpPageHandler {
    let state = make_test_state(roster, registrations);
    SignUpPageHandler::new(
        TEST_TITLE,
        state.availability,
        state.registrations,
        state.register_handler,
    )
}
