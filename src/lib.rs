pub mod api;
pub mod app_env;
pub mod db;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod logging;
pub mod pages;
pub mod persistence;
pub mod routing_utils;

#[cfg(test)]
mod integration_test;

use anyhow::Context;
use axum::extract::State;
use std::env;
use std::sync::Arc;
use tera::Tera;

/// State shared by every request handler across both surfaces
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
    pub templates: Tera,
}

/// The extractor handlers use to get at [SharedData]
pub type AppState = State<Arc<SharedData>>;

/// Connects to the database named by DATABASE_URL (a local file by default),
/// makes sure the schema exists, and produces the state shared by the server
/// binaries.
pub async fn app_setup() -> Result<SharedData, anyhow::Error> {
    let db_url =
        env::var(app_env::DB_URL).unwrap_or_else(|_| String::from("sqlite://todo.db"));
    let pool = db::connect_sqlx(&db_url).await?;
    db::ensure_schema(&pool).await?;

    Ok(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
        templates: pages::load_templates().context("parsing page templates")?,
    })
}
