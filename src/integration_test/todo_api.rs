use crate::api;
use crate::api::test_util::deserialize_body;
use crate::dto;
use crate::integration_test::test_util::prepare_application;
use crate::routing_utils::BasicErrorResponse;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use speculoos::prelude::*;
use std::collections::HashSet;
use tower::ServiceExt;

async fn prepare_api() -> Router {
    let app_state = prepare_application().await;
    api::api_routes().with_state(app_state)
}

fn json_request(method: Method, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("could not build request")
}

fn bare_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("could not build request")
}

fn create_body(title: &str, description: &str) -> String {
    serde_json::to_string(&dto::NewTodo {
        title: title.to_owned(),
        description: description.to_owned(),
    })
    .expect("could not serialize the create payload")
}

async fn create_todo_via_api(app: &Router, title: &str, description: &str) -> dto::TodoItem {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/todos/",
            create_body(title, description),
        ))
        .await
        .expect("create request failed");
    assert_eq!(StatusCode::CREATED, response.status());

    deserialize_body(response.into_body()).await
}

#[tokio::test]
async fn welcome_greets_at_the_root() {
    let app = prepare_api().await;

    let response = app
        .oneshot(bare_request(Method::GET, "/"))
        .await
        .expect("welcome request failed");
    assert_eq!(StatusCode::OK, response.status());

    let welcome: dto::Welcome = deserialize_body(response.into_body()).await;
    assert_that!(welcome.message).is_equal_to("Welcome to ToDo API".to_owned());
}

#[tokio::test]
async fn created_todos_can_be_read_back() {
    let app = prepare_api().await;

    let created = create_todo_via_api(&app, "Buy milk", "2%").await;
    assert!(created.id > 0);
    assert_that!(created.title).is_equal_to("Buy milk".to_owned());
    assert_that!(created.description).is_equal_to("2%".to_owned());
    assert!(!created.completed);

    let response = app
        .oneshot(bare_request(
            Method::GET,
            &format!("/todos/{}", created.id),
        ))
        .await
        .expect("fetch request failed");
    assert_eq!(StatusCode::OK, response.status());

    let fetched: dto::TodoItem = deserialize_body(response.into_body()).await;
    assert_eq!(created, fetched);
}

#[tokio::test]
async fn missing_ids_produce_404() {
    let app = prepare_api().await;

    let get_response = app
        .clone()
        .oneshot(bare_request(Method::GET, "/todos/999"))
        .await
        .expect("fetch request failed");
    assert_eq!(StatusCode::NOT_FOUND, get_response.status());
    let get_error: BasicErrorResponse = deserialize_body(get_response.into_body()).await;
    assert_that!(get_error.error_code).is_equal_to("not_found".to_owned());

    let update_response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/todos/999",
            serde_json::to_string(&dto::UpdateTodo {
                title: "New title".to_owned(),
                description: "New desc".to_owned(),
            })
            .expect("could not serialize the update payload"),
        ))
        .await
        .expect("update request failed");
    assert_eq!(StatusCode::NOT_FOUND, update_response.status());

    let delete_response = app
        .oneshot(bare_request(Method::DELETE, "/todos/999"))
        .await
        .expect("delete request failed");
    assert_eq!(StatusCode::NOT_FOUND, delete_response.status());
}

#[tokio::test]
async fn update_rewrites_only_title_and_description() {
    let app = prepare_api().await;

    let created = create_todo_via_api(&app, "Buy milk", "2%").await;
    let update_response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/todos/{}", created.id),
            serde_json::to_string(&dto::UpdateTodo {
                title: "New title".to_owned(),
                description: "New desc".to_owned(),
            })
            .expect("could not serialize the update payload"),
        ))
        .await
        .expect("update request failed");
    assert_eq!(StatusCode::OK, update_response.status());

    let updated: dto::TodoItem = deserialize_body(update_response.into_body()).await;
    assert_eq!(created.id, updated.id);
    assert_that!(updated.title).is_equal_to("New title".to_owned());
    assert_that!(updated.description).is_equal_to("New desc".to_owned());
    assert_eq!(created.completed, updated.completed);

    // Round trip: a later fetch shows the new values
    let fetch_response = app
        .oneshot(bare_request(
            Method::GET,
            &format!("/todos/{}", created.id),
        ))
        .await
        .expect("fetch request failed");
    let fetched: dto::TodoItem = deserialize_body(fetch_response.into_body()).await;
    assert_eq!(updated, fetched);
}

#[tokio::test]
async fn deleted_todos_stay_gone() {
    let app = prepare_api().await;

    let created = create_todo_via_api(&app, "Buy milk", "2%").await;
    let delete_response = app
        .clone()
        .oneshot(bare_request(
            Method::DELETE,
            &format!("/todos/{}", created.id),
        ))
        .await
        .expect("delete request failed");
    assert_eq!(StatusCode::OK, delete_response.status());

    let ack: dto::DeletedTodo = deserialize_body(delete_response.into_body()).await;
    assert_that!(ack.message).is_equal_to("ToDo deleted".to_owned());

    let fetch_response = app
        .oneshot(bare_request(
            Method::GET,
            &format!("/todos/{}", created.id),
        ))
        .await
        .expect("fetch request failed");
    assert_eq!(StatusCode::NOT_FOUND, fetch_response.status());
}

#[tokio::test]
async fn listing_reflects_creations_and_deletions() {
    let app = prepare_api().await;

    let first = create_todo_via_api(&app, "Buy milk", "2%").await;
    let second = create_todo_via_api(&app, "Walk the dog", "Before it rains").await;
    let third = create_todo_via_api(&app, "Water plants", "Just the ferns").await;

    let delete_response = app
        .clone()
        .oneshot(bare_request(
            Method::DELETE,
            &format!("/todos/{}", second.id),
        ))
        .await
        .expect("delete request failed");
    assert_eq!(StatusCode::OK, delete_response.status());

    let list_response = app
        .oneshot(bare_request(Method::GET, "/todos/"))
        .await
        .expect("list request failed");
    assert_eq!(StatusCode::OK, list_response.status());

    let listed: Vec<dto::TodoItem> = deserialize_body(list_response.into_body()).await;
    assert_that!(listed).has_length(2);

    // Survivors match regardless of iteration order
    let listed_ids: HashSet<i64> = listed.iter().map(|todo| todo.id).collect();
    let expected_ids: HashSet<i64> = [first.id, third.id].into_iter().collect();
    assert_eq!(expected_ids, listed_ids);
}

#[tokio::test]
async fn malformed_json_produces_400() {
    let app = prepare_api().await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/todos/",
            String::from("{\"title\": \"Buy milk\""),
        ))
        .await
        .expect("create request failed");
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let error: BasicErrorResponse = deserialize_body(response.into_body()).await;
    assert_that!(error.error_code).is_equal_to("invalid_json".to_owned());
}
