use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Catalog item routes mounted at `/items`.
///
/// ```text
/// GET  /?type=product|collection   -> list_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(items::list_items))
}
