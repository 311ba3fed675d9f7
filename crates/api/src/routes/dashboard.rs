//! Route definitions for the AI-content dashboard.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET   /                       -> get_dashboard
/// GET   /{item_id}/preview      -> preview
/// POST  /revert                 -> revert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::get_dashboard))
        .route("/{item_id}/preview", get(dashboard::preview))
        .route("/revert", post(dashboard::revert))
}
