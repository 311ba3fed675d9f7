pub mod content;
pub mod dashboard;
pub mod health;
pub mod items;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items?type=                                     list catalog items
///
/// /dashboard                                       rows and summary
/// /dashboard/{item_id}/preview?item_type=&kind=    original vs current
/// /dashboard/revert                                revert a field (POST)
///
/// /sessions                                        create (POST)
/// /sessions/{id}                                   get, delete
/// /sessions/{id}/select                            select item (POST)
/// /sessions/{id}/generate                          generate (POST)
/// /sessions/{id}/edit                              begin edit (POST)
/// /sessions/{id}/save                              save edit (POST)
/// /sessions/{id}/cancel-edit                       cancel edit (POST)
/// /sessions/{id}/publish                           publish (POST)
/// /sessions/{id}/reset                             reset (POST)
///
/// /content/actions                                 direct update or revert (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/items", items::router())
        .nest("/dashboard", dashboard::router())
        .nest("/sessions", sessions::router())
        .nest("/content", content::router())
}
