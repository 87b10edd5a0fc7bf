use crate::SharedData;
use axum::Router;
use std::sync::Arc;

pub mod swagger_main;
pub mod todo;

#[cfg(test)]
pub mod test_util;

/// Assembles the full JSON API router: the welcome route plus the to-do CRUD
/// routes
pub fn api_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .merge(todo::root_routes())
        .merge(todo::todo_routes())
}
