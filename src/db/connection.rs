use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

const ENTITY_REGISTRY_PREFIX: &str = "todo_api::db::entities::*";

/// Opens the pool and makes sure the schema exists before anything is served.
///
/// sqlx applies a busy timeout to every pooled SQLite connection, so
/// concurrent writers wait on the engine's lock instead of failing fast.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    init_schema(&db).await?;
    Ok(db)
}

/// Creates missing tables from the entity definitions. Safe to run repeatedly.
pub async fn init_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry(ENTITY_REGISTRY_PREFIX)
        .sync(db)
        .await?;
    Ok(())
}
