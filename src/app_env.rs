/// URL for accessing the SQLite database file (e.g. "sqlite://todo.db")
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. Takes standard tracing filter directives.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Port the server binary listens on. Defaults to 8080 when unset.
pub const SERVER_PORT: &str = "SERVER_PORT";
