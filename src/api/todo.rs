use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post, put};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

use crate::domain::todo::driving_ports::{TodoError, TodoPort};
use crate::external_connections::{ExternalConnectivity, Transactable};
use crate::routing_utils::{GenericErrorResponse, Json, TodoErrorResponse};
use crate::{AppState, SharedData, domain, dto, persistence};

#[derive(OpenApi)]
#[openapi(paths(welcome, create_todo, list_todos, get_todo, update_todo, delete_todo))]
/// Defines the OpenAPI documentation for the to-do endpoints
pub struct TodoApi;

/// Constant used to group to-do endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "To-Dos";

/// Adds the route serving the welcome message at the root of the API
pub fn root_routes() -> Router<Arc<SharedData>> {
    Router::new().route("/", get(welcome))
}

/// Adds CRUD routes for to-do items under "/todos/"
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/todos/",
            post(
                async |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/",
            get(async |State(app_state): AppState| {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                list_todos(&mut ext_cxn, &todo_service).await
            }),
        )
        .route(
            "/todos/:todo_id",
            get(
                async |State(app_state): AppState, Path(todo_id): Path<i64>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    get_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/:todo_id",
            put(
                async |State(app_state): AppState,
                       Path(todo_id): Path<i64>,
                       Json(update): Json<dto::UpdateTodo>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    update_todo(todo_id, update, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/:todo_id",
            delete(
                async |State(app_state): AppState, Path(todo_id): Path<i64>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Welcome message", body = dto::Welcome),
    ),
)]
/// Greets consumers at the root of the API
async fn welcome() -> Json<dto::Welcome> {
    Json(dto::Welcome {
        message: "Welcome to ToDo API".to_owned(),
    })
}

#[utoipa::path(
    post,
    path = "/todos/",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "To-do item created", body = dto::TodoItem),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Creates a new to-do item and returns it as read back from storage
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut (impl ExternalConnectivity + Transactable),
    todo_service: &impl TodoPort,
) -> Result<(StatusCode, Json<dto::TodoItem>), ErrorResponse> {
    info!("Attempt to create to-do item: {new_todo}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let domain_create = domain::todo::NewTodo::from(new_todo);
    let creation_result = todo_service
        .create_todo(&domain_create, &mut *ext_cxn, &todo_reader, &todo_writer)
        .await;
    match creation_result {
        Ok(created_todo) => Ok((StatusCode::CREATED, Json(created_todo.into()))),
        Err(port_err) => {
            error!("To-do create failure: {port_err}");
            Err(GenericErrorResponse(port_err).into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/todos/",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "All stored to-do items", body = Vec<dto::TodoItem>),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Retrieves every stored to-do item, in no particular order
async fn list_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<Vec<dto::TodoItem>>, ErrorResponse> {
    info!("Requested to-do list");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};

    let todos_result = todo_service.all_todos(&mut *ext_cxn, &todo_reader).await;
    if todos_result.is_err() {
        error!(
            "Could not retrieve to-do items: {}",
            todos_result.as_ref().unwrap_err()
        );
    }
    let response = todos_result
        .map_err(GenericErrorResponse)?
        .into_iter()
        .map(dto::TodoItem::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the to-do item to fetch"),
    ),
    responses(
        (status = 200, description = "The requested to-do item", body = dto::TodoItem),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Retrieves a single to-do item by its ID
async fn get_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Get to-do item {todo_id}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};

    let fetch_result = todo_service
        .todo_by_id(todo_id, &mut *ext_cxn, &todo_reader)
        .await;
    if let Err(ref contained_err) = fetch_result {
        // The "not found" case doesn't merit an error log
        match contained_err {
            TodoError::NotFound => {}
            other => error!("Failed to get to-do item {todo_id}: {other}"),
        }
    }

    Ok(Json(fetch_result.map_err(TodoErrorResponse::from)?.into()))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the to-do item to update"),
    ),
    request_body = dto::UpdateTodo,
    responses(
        (status = 200, description = "The updated to-do item", body = dto::TodoItem),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Overwrites the title and description of an existing to-do item. The
/// completion flag is left untouched.
async fn update_todo(
    todo_id: i64,
    update: dto::UpdateTodo,
    ext_cxn: &mut (impl ExternalConnectivity + Transactable),
    todo_service: &impl TodoPort,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Updating to-do item {todo_id}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let domain_update = domain::todo::UpdateTodo::from(update);
    let update_result = todo_service
        .update_todo(
            todo_id,
            &domain_update,
            &mut *ext_cxn,
            &todo_reader,
            &todo_writer,
        )
        .await;
    if let Err(ref contained_err) = update_result {
        match contained_err {
            TodoError::NotFound => {}
            other => error!("Failed to update to-do item {todo_id}: {other}"),
        }
    }

    Ok(Json(update_result.map_err(TodoErrorResponse::from)?.into()))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the to-do item to delete"),
    ),
    responses(
        (status = 200, description = "Deletion acknowledgment", body = dto::DeletedTodo),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Permanently removes a to-do item
async fn delete_todo(
    todo_id: i64,
    ext_cxn: &mut (impl ExternalConnectivity + Transactable),
    todo_service: &impl TodoPort,
) -> Result<Json<dto::DeletedTodo>, ErrorResponse> {
    info!("Deleting to-do item {todo_id}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let delete_result = todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_reader, &todo_writer)
        .await;
    if let Err(ref contained_err) = delete_result {
        match contained_err {
            TodoError::NotFound => {}
            other => error!("Failed to delete to-do item {todo_id}: {other}"),
        }
    }
    delete_result.map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::DeletedTodo {
        message: "ToDo deleted".to_owned(),
    }))
}
