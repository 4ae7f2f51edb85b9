use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::shifts::core::shift::format_date;
use crate::modules::shifts::core::slots::parse_user_date;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListSlotsParams {
    pub date: String,
}

pub async fn handle_slots(
    State(state): State<AppState>,
    Query(params): Query<ListSlotsParams>,
) -> impl IntoResponse {
    let Some(date) = parse_user_date(&params.date) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    match state.availability.slots_for(date).await {
        Ok(slots) => Json(slots).into_response(),
        Err(_) => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

pub async fn handle_dates(State(state): State<AppState>) -> impl IntoResponse {
    match state.availability.available_dates().await {
        Ok(dates) => Json(dates.into_iter().map(format_date).collect::<Vec<_>>()).into_response(),
        Err(_) => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
