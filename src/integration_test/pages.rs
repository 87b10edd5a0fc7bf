use crate::integration_test::test_util::prepare_application;
use crate::{api, pages};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use speculoos::prelude::*;
use tower::ServiceExt;

/// Builds the page router and the JSON API router over the same database so
/// tests can observe one surface through the other
async fn prepare_both_surfaces() -> (Router, Router) {
    let app_state = prepare_application().await;
    (
        pages::page_routes().with_state(app_state.clone()),
        api::api_routes().with_state(app_state),
    )
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("could not build request")
}

async fn page_text(pages_app: &Router) -> String {
    let response = pages_app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/")
                .body(Body::empty())
                .expect("could not build request"),
        )
        .await
        .expect("home request failed");
    assert_eq!(StatusCode::OK, response.status());

    let body_bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("could not read the rendered page");
    String::from_utf8(body_bytes.to_vec()).expect("rendered page was not valid utf-8")
}

#[tokio::test]
async fn added_todos_show_up_on_the_next_render() {
    let (pages_app, _) = prepare_both_surfaces().await;

    let empty_page = page_text(&pages_app).await;
    assert_that!(empty_page).contains("Nothing to do yet");

    let add_response = pages_app
        .clone()
        .oneshot(form_request("/add", "title=Buy+milk&description=2%25"))
        .await
        .expect("add request failed");
    assert_eq!(StatusCode::SEE_OTHER, add_response.status());
    assert_eq!(
        "/",
        add_response
            .headers()
            .get(header::LOCATION)
            .expect("redirect should carry a location header")
            .to_str()
            .expect("location header should be valid text")
    );

    let listing_page = page_text(&pages_app).await;
    assert_that!(listing_page).contains("Buy milk");
    assert_that!(listing_page).contains("2%");
}

#[tokio::test]
async fn delete_form_removes_the_row() {
    let (pages_app, _) = prepare_both_surfaces().await;

    pages_app
        .clone()
        .oneshot(form_request("/add", "title=Buy+milk&description=2%25"))
        .await
        .expect("add request failed");

    let delete_response = pages_app
        .clone()
        .oneshot(form_request("/delete/1", ""))
        .await
        .expect("delete request failed");
    assert_eq!(StatusCode::SEE_OTHER, delete_response.status());

    let listing_page = page_text(&pages_app).await;
    assert_that!(listing_page).contains("Nothing to do yet");
}

#[tokio::test]
async fn deleting_a_missing_row_redirects_while_the_api_rejects_it() {
    let (pages_app, api_app) = prepare_both_surfaces().await;

    // The form path treats an absent row as already handled
    let form_response = pages_app
        .oneshot(form_request("/delete/999", ""))
        .await
        .expect("form delete request failed");
    assert_eq!(StatusCode::SEE_OTHER, form_response.status());

    // The JSON path reports the same id as missing
    let api_response = api_app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/todos/999")
                .body(Body::empty())
                .expect("could not build request"),
        )
        .await
        .expect("api delete request failed");
    assert_eq!(StatusCode::NOT_FOUND, api_response.status());
}
