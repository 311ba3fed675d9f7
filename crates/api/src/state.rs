use std::sync::Arc;

use copydesk_core::ports::{CatalogService, ContentGenerator, ContentStore};

use crate::config::ServerConfig;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Catalog GraphQL client.
    pub catalog: Arc<dyn CatalogService>,
    /// Content-origin store client.
    pub content_store: Arc<dyn ContentStore>,
    /// AI generation client.
    pub generator: Arc<dyn ContentGenerator>,
    /// Generation sessions, one per open editor.
    pub sessions: Arc<SessionStore>,
}
