use axum::{Extension, Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::modules::shifts::use_cases::list_available_slots::inbound::http as slots_http;
use crate::modules::shifts::use_cases::list_registrations::inbound::http as list_http;
use crate::modules::shifts::use_cases::register_volunteer::inbound::http as register_http;
use crate::modules::shifts::use_cases::sign_up_page::inbound::http as page_http;
use crate::shell::graphql::{self, build_schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());

    Router::new()
        .route("/", get(page_http::show).post(page_http::submit))
        .route("/api/slots", get(slots_http::handle_slots))
        .route("/api/dates", get(slots_http::handle_dates))
        .route(
            "/api/registrations",
            get(list_http::handle).post(register_http::handle),
        )
        .route("/gql", get(graphql::graphiql).post(graphql::graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
