use anyhow::Context;
use sqlx::migrate::MigrateDatabase;
use sqlx::{Sqlite, SqlitePool};
use tracing::info;

/// Opens a connection pool against the SQLite database at [db_url], creating
/// the database file first if it doesn't exist yet.
pub async fn connect_sqlx(db_url: &str) -> Result<SqlitePool, anyhow::Error> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!("Creating database {db_url}.");
        Sqlite::create_database(db_url)
            .await
            .context("creating the sqlite database")?;
    }

    let pool = SqlitePool::connect(db_url)
        .await
        .context("connecting to the sqlite database")?;
    Ok(pool)
}

/// Creates the todo_item table if it isn't there yet. Runs on process start,
/// never alters an existing schema.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), anyhow::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS todo_item (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE
        )",
    )
    .execute(pool)
    .await
    .context("creating the todo_item table")?;

    Ok(())
}
