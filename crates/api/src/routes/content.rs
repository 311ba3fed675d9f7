use axum::routing::post;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Direct content routes mounted at `/content`.
///
/// ```text
/// POST  /actions   -> apply_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/actions", post(content::apply_action))
}
