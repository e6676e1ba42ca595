//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::PractitionerRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one store handle built at start-up
    pub repository: Arc<dyn PractitionerRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PractitionerRepository>) -> Self {
        Self { repository }
    }
}
