use axum::{
    Form,
    extract::{Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::Local;
use serde::Deserialize;

use crate::modules::shifts::use_cases::sign_up_page::handler::SignUpForm;
use crate::modules::shifts::use_cases::sign_up_page::view::render;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct PageParams {
    pub date: Option<String>,
}

pub async fn show(State(state): State<AppState>, Query(params): Query<PageParams>) -> Html<String> {
    let page = state.page_handler.show(params.date.as_deref()).await;
    Html(render(&page))
}

pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<SignUpForm>, FormRejection>,
) -> impl IntoResponse {
    let Form(form) = match form {
        Ok(f) => f,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let page = state
        .page_handler
        .submit(form, Local::now().naive_local())
        .await;
    Html(render(&page)).into_response()
}

#[cfg(test)]
mod sign_up_page_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shared::infrastructure::table_store::in_memory::InMemoryTableStore;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::roster::RosterBuilder;
    use crate::tests::fixtures::state::make_test_state;

    use super::{show, submit};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/", get(show).post(submit))
            .with_state(state)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn it_should_render_the_page_for_the_requested_date() {
        let roster = RosterBuilder::new()
            .shift("12/05/2026_08-14", "3")
            .shift("13/05/2026_14-18", "1")
            .store();
        let response = app(make_test_state(roster, InMemoryTableStore::new()))
            .oneshot(
                Request::get("/?date=13%2F05%2F2026")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<option value=\"13/05/2026_14-18\">14-18 (posti: 1)</option>"));
        assert!(!html.contains("12/05/2026_08-14\">"));
    }

    #[tokio::test]
    async fn it_should_confirm_a_posted_sign_up() {
        let roster = RosterBuilder::new().shift("12/05/2026_08-14", "3").store();
        let response = app(make_test_state(roster, InMemoryTableStore::new()))
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "date=12%2F05%2F2026&shift=12%2F05%2F2026_08-14&name=Maria+Rossi&email=maria%40example.org",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Grazie Maria Rossi!"));
        assert!(html.contains("<li>Maria Rossi</li>"));
    }

    #[tokio::test]
    async fn it_should_show_an_inline_error_for_an_empty_name() {
        let roster = RosterBuilder::new().shift("12/05/2026_08-14", "3").store();
        let response = app(make_test_state(roster, InMemoryTableStore::new()))
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "date=12%2F05%2F2026&shift=12%2F05%2F2026_08-14&name=&email=maria%40example.org",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("class=\"notice error\""));
        assert!(html.contains("value=\"maria@example.org\""));
        assert!(!html.contains("Grazie"));
    }

    #[tokio::test]
    async fn it_should_return_422_without_a_form_body() {
        let roster = RosterBuilder::new().shift("12/05/2026_08-14", "3").store();
        let response = app(make_test_state(roster, InMemoryTableStore::new()))
            .oneshot(Request::post("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
