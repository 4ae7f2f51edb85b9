use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::modules::shifts::use_cases::errors::ApplicationError;
use crate::modules::shifts::use_cases::register_volunteer::command::RegisterVolunteer;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct RegisterVolunteerBody {
    pub volunteer_name: String,
    pub volunteer_email: Option<String>,
    pub shift_reference: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn status_for(error: &ApplicationError) -> StatusCode {
    match error {
        ApplicationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationError::SourceUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
        e if e.is_revision_conflict() => StatusCode::CONFLICT,
        ApplicationError::WriteFailure(_) => StatusCode::BAD_GATEWAY,
    }
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<RegisterVolunteerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = RegisterVolunteer {
        volunteer_name: body.volunteer_name,
        volunteer_email: body.volunteer_email,
        shift_reference: body.shift_reference,
        submitted_at: Local::now().naive_local(),
    };

    match state.register_handler.handle(command).await {
        Ok(registration) => (StatusCode::CREATED, Json(registration)).into_response(),
        Err(e) => (
            status_for(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
