use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::shifts::core::slots::parse_user_date;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListRegistrationsParams {
    pub date: String,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListRegistrationsParams>,
) -> impl IntoResponse {
    match parse_user_date(&params.date) {
        Some(date) => Json(state.registrations.public_for_date(date).await).into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

#[cfg(test)]
mod list_registrations_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::shifts::core::registration::empty_registrations_table;
    use crate::shared::infrastructure::table_store::in_memory::InMemoryTableStore;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::roster::RosterBuilder;
    use crate::tests::fixtures::state::make_test_state;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/api/registrations", get(handle))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_return_200_with_empty_list_when_nobody_signed_up() {
        let roster = RosterBuilder::new().shift("12/05/2026_08-14", "3").store();
        let response = app(make_test_state(roster, InMemoryTableStore::new()))
            .oneshot(
                Request::get("/api/registrations?date=12%2F05%2F2026")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn it_should_return_the_registrations_of_the_day() {
        let roster = RosterBuilder::new().shift("12/05/2026_08-14", "3").store();
        let mut table = empty_registrations_table();
        table.push_row(vec![
            "Maria Rossi".into(),
            "12/05/2026_08-14".into(),
            "maria@example.org".into(),
        ]);
        table.push_row(vec!["Luca Bianchi".into(), "13/05/2026_08-14".into()]);
        let response = app(make_test_state(roster, InMemoryTableStore::with_table(table)))
            .oneshot(
                Request::get("/api/registrations?date=2026-05-12")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["volunteer_name"], "Maria Rossi");
        assert_eq!(json[0]["time_band"], "08-14");
        assert!(json[0].get("volunteer_email").is_none());
        assert!(!String::from_utf8_lossy(&bytes).contains('@'));
    }

    #[tokio::test]
    async fn it_should_return_400_when_date_is_missing() {
        let roster = RosterBuilder::new().shift("12/05/2026_08-14", "3").store();
        let response = app(make_test_state(roster, InMemoryTableStore::new()))
            .oneshot(
                Request::get("/api/registrations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
