use std::sync::Arc;

use cadastro_core::report::ReportGenerator;
use cadastro_db::{CredentialStore, RecordStore};

use crate::config::ServerConfig;
use crate::directory::PersonDirectory;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Person and phone workflows over the record store.
    pub directory: Arc<PersonDirectory>,
    /// Backing record store, also used directly by the health check.
    pub store: Arc<dyn RecordStore>,
    /// Login accounts for the auth gate.
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn RecordStore>,
        credentials: Arc<dyn CredentialStore>,
        reports: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            directory: Arc::new(PersonDirectory::new(Arc::clone(&store), reports)),
            store,
            credentials,
        }
    }
}
