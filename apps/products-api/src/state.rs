//! Application state management

use mongodb::Client;

/// State for the readiness probe
#[derive(Clone)]
pub struct AppState {
    pub mongo_client: Client,
    pub database: String,
}

impl AppState {
    pub fn new(mongo_client: Client, database: impl Into<String>) -> Self {
        Self {
            mongo_client,
            database: database.into(),
        }
    }
}
