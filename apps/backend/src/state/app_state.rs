use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::ai::TextGenerator;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ai: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, ai: Arc<dyn TextGenerator>) -> Self {
        Self { db, ai }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn ai(&self) -> &Arc<dyn TextGenerator> {
        &self.ai
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &"DatabaseConnection")
            .field("ai", &"dyn TextGenerator")
            .finish()
    }
}
