use crate::{SharedData, db, pages, persistence};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

/// Creates application state backed by a fresh in-memory database with the
/// schema applied, so every test starts from an empty table.
///
/// The pool is pinned to a single connection that never expires. An in-memory
/// SQLite database lives and dies with its connection, so letting the pool
/// open a second connection or drop an idle one would silently produce an
/// empty, unrelated database.
pub async fn prepare_application() -> Arc<SharedData> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("could not open the in-memory database");
    db::ensure_schema(&pool)
        .await
        .expect("could not apply the schema to the in-memory database");

    Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
        templates: pages::load_templates().expect("page templates should parse"),
    })
}
