pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: i64 = 5000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 10;
pub const DEFAULT_DB_MIN_IDLE: i64 = 1;

/// Plain env var that overrides `general.port`, as container platforms expect.
pub const PORT_ENV_VAR: &str = "PORT";
