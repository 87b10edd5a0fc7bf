use anyhow::Context;
use axum::Router;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use todo_rest::{api, app_env, app_setup, logging};
use tokio::net::TcpListener;
use tracing::info;

/// Serves the JSON variant of the to-do service.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    logging::setup_logging(logging::init_env_filter());

    let shared_data = app_setup().await?;
    let router = logging::attach_tracing_http(
        Router::new()
            .merge(api::api_routes())
            .merge(api::swagger_main::build_documentation()),
    )
    .with_state(Arc::new(shared_data));

    let listen_port = env::var(app_env::SERVER_PORT).unwrap_or_else(|_| String::from("8080"));
    let listen_addr = format!("0.0.0.0:{listen_port}");
    info!("Starting JSON API server on {listen_addr}.");
    let listener = TcpListener::bind(&listen_addr)
        .await
        .context("binding the server socket")?;
    axum::serve(listener, router)
        .await
        .context("running the server")?;

    Ok(())
}
