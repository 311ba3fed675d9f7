//! The admin front-end's direct content update action.
//!
//! Unlike the rest of the API this endpoint answers with the
//! `{ success, message | error }` shape the front-end expects.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use copydesk_core::workflow::{self, ContentAction, ContentCommand};
use serde_json::json;

use crate::error::classify_core_error;
use crate::state::AppState;

/// POST /api/v1/content/actions
pub async fn apply_action(
    State(state): State<AppState>,
    Json(command): Json<ContentCommand>,
) -> impl IntoResponse {
    match workflow::apply_content_command(&command, state.catalog.as_ref()).await {
        Ok(item) => {
            let message = match command.action {
                ContentAction::UpdateContent => "Content updated successfully",
                ContentAction::Revert => "Content reverted successfully",
            };
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": message,
                    "updatedItem": item,
                })),
            )
        }
        Err(e) => {
            let (status, _code, message) = classify_core_error(&e);
            tracing::warn!(item_id = %command.item_id, error = %e, "Content action failed");
            (
                status,
                Json(json!({
                    "success": false,
                    "error": message,
                })),
            )
        }
    }
}
