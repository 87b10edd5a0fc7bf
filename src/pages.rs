use anyhow::anyhow;
use axum::Router;
use axum::extract::{Form, Path, State};
use axum::response::{ErrorResponse, Html, Redirect};
use axum::routing::{get, post};
use std::sync::Arc;
use tera::Tera;
use tracing::{error, info};

use crate::domain::todo::driving_ports::{TodoError, TodoPort};
use crate::external_connections::{ExternalConnectivity, Transactable};
use crate::routing_utils::GenericErrorResponse;
use crate::{AppState, SharedData, domain, dto, persistence};

/// Parses the page templates shipped inside the binary
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut templates = Tera::default();
    templates.add_raw_template("home.html", include_str!("../templates/home.html"))?;

    Ok(templates)
}

/// Adds the routes for the server-rendered to-do pages: the listing page plus
/// the add/delete form targets
pub fn page_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(async |State(app_state): AppState| {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                home(&app_state.templates, &mut ext_cxn, &todo_service).await
            }),
        )
        .route(
            "/add",
            post(
                async |State(app_state): AppState, Form(new_todo): Form<dto::NewTodo>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    add_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/delete/:todo_id",
            post(
                async |State(app_state): AppState, Path(todo_id): Path<i64>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo_form(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

/// Renders the listing page with every stored to-do item
async fn home(
    templates: &Tera,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Html<String>, ErrorResponse> {
    info!("Rendering the to-do listing page");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};

    let todos_result = todo_service.all_todos(&mut *ext_cxn, &todo_reader).await;
    if todos_result.is_err() {
        error!(
            "Could not retrieve to-do items for the listing page: {}",
            todos_result.as_ref().unwrap_err()
        );
    }
    let todo_views: Vec<dto::TodoItem> = todos_result
        .map_err(GenericErrorResponse)?
        .into_iter()
        .map(dto::TodoItem::from)
        .collect();

    let mut page_vars = tera::Context::new();
    page_vars.insert("todos", &todo_views);
    let rendered_page = templates
        .render("home.html", &page_vars)
        .map_err(|render_err| {
            error!("Could not render the listing page: {render_err}");
            GenericErrorResponse(anyhow!(render_err))
        })?;

    Ok(Html(rendered_page))
}

/// Creates a to-do item from the add form, then sends the browser back to the
/// listing page rather than echoing the created row
async fn add_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut (impl ExternalConnectivity + Transactable),
    todo_service: &impl TodoPort,
) -> Result<Redirect, ErrorResponse> {
    info!("Adding to-do item from form: {new_todo}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let domain_create = domain::todo::NewTodo::from(new_todo);
    let creation_result = todo_service
        .create_todo(&domain_create, &mut *ext_cxn, &todo_reader, &todo_writer)
        .await;
    if let Err(port_err) = creation_result {
        error!("Form-based to-do create failure: {port_err}");
        return Err(GenericErrorResponse(port_err).into());
    }

    Ok(Redirect::to("/"))
}

/// Deletes a to-do item from its listing-page form. Unlike the API's delete,
/// a missing row is treated as already handled and the browser is sent back to
/// the listing page either way.
async fn delete_todo_form(
    todo_id: i64,
    ext_cxn: &mut (impl ExternalConnectivity + Transactable),
    todo_service: &impl TodoPort,
) -> Result<Redirect, ErrorResponse> {
    info!("Deleting to-do item {todo_id} from form");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let delete_result = todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_reader, &todo_writer)
        .await;
    match delete_result {
        Ok(()) | Err(TodoError::NotFound) => Ok(Redirect::to("/")),
        Err(port_err) => {
            error!("Form-based to-do delete failure: {port_err}");
            Err(GenericErrorResponse(port_err.into()).into())
        }
    }
}
