//! Test state builder (two-stage test harness, stage 1).
//! Builds an AppState backed by a fresh in-memory SQLite database with all
//! migrations (schema + catalog seed) applied and AI text generation
//! disabled, so prompts are the deterministic base templates.

use std::sync::Arc;
use std::time::Duration;

use backend::ai::Disabled;
use backend::state::app_state::AppState;
use backend::AppError;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};

pub async fn build_test_state() -> Result<AppState, AppError> {
    // One connection keeps every query on the same in-memory database.
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    Migrator::up(&db, None).await?;

    Ok(AppState::new(db, Arc::new(Disabled)))
}
