use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::ItemTypeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/items?type=product|collection
///
/// Every item of the requested type, walked page by page. A failed page
/// yields the items fetched so far.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemTypeParams>,
) -> AppResult<impl IntoResponse> {
    let item_type = params.item_type()?;
    let items = state.catalog.list_items(item_type).await;
    tracing::debug!(%item_type, count = items.len(), "Listed catalog items");
    Ok(Json(DataResponse { data: items }))
}
