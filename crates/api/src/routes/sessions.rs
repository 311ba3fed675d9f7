//! Route definitions for generation sessions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Session routes mounted at `/sessions`.
///
/// ```text
/// POST    /                    -> create_session
/// GET     /{id}                -> get_session
/// DELETE  /{id}                -> delete_session
/// POST    /{id}/select         -> select_item
/// POST    /{id}/generate       -> generate
/// POST    /{id}/edit           -> begin_edit
/// POST    /{id}/save           -> save_edit
/// POST    /{id}/cancel-edit    -> cancel_edit
/// POST    /{id}/publish        -> publish
/// POST    /{id}/reset          -> reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create_session))
        .route(
            "/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/{id}/select", post(sessions::select_item))
        .route("/{id}/generate", post(sessions::generate))
        .route("/{id}/edit", post(sessions::begin_edit))
        .route("/{id}/save", post(sessions::save_edit))
        .route("/{id}/cancel-edit", post(sessions::cancel_edit))
        .route("/{id}/publish", post(sessions::publish))
        .route("/{id}/reset", post(sessions::reset))
}
