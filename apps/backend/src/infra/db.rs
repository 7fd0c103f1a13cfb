use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::db_url;
use crate::error::AppError;

/// Connect to the configured database and bring the schema up to date.
pub async fn connect_and_migrate() -> Result<DatabaseConnection, AppError> {
    let database_url = db_url()?;
    let conn = connect(&database_url).await?;
    Migrator::up(&conn, None).await?;
    info!("database connected and migrations applied");
    Ok(conn)
}

/// Connect without running migrations.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(database_url.to_owned());
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    let conn = Database::connect(opts).await?;
    Ok(conn)
}
