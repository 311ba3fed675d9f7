//! Handlers for the AI-content dashboard.
//!
//! Routes:
//! - `GET  /dashboard`                   reconciled rows and summary
//! - `GET  /dashboard/{item_id}/preview` original vs current preview HTML
//! - `POST /dashboard/revert`            write the stored original back

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use copydesk_core::preview::to_preview_html;
use copydesk_core::reconcile::DashboardRow;
use copydesk_core::types::{ContentKind, ItemType};
use copydesk_core::workflow::{self, RevertOutcome};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::query::PreviewParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub item_id: String,
    pub kind: ContentKind,
    /// `None` when no original is stored for this kind.
    pub original_html: Option<String>,
    pub current_html: String,
    pub is_reverted: bool,
}

#[derive(Debug, Deserialize)]
pub struct RevertRequest {
    pub item_id: String,
    pub item_type: ItemType,
    pub content_kind: ContentKind,
}

#[derive(Debug, Serialize)]
pub struct RevertResponse {
    /// `false` when the field already held its original and nothing was
    /// written.
    pub reverted: bool,
    pub row: DashboardRow,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let dashboard =
        workflow::load_dashboard(state.catalog.as_ref(), state.content_store.as_ref()).await;
    tracing::info!(
        rows = dashboard.rows.len(),
        modified = dashboard.summary.modified_count,
        "Dashboard loaded"
    );
    Ok(Json(DataResponse { data: dashboard }))
}

/// GET /api/v1/dashboard/{item_id}/preview?item_type=&kind=
pub async fn preview(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(params): Query<PreviewParams>,
) -> AppResult<impl IntoResponse> {
    let (item_type, kind) = params.parse()?;
    let row = workflow::load_row(
        state.catalog.as_ref(),
        state.content_store.as_ref(),
        &item_id,
        item_type,
    )
    .await?;

    let original_html = row
        .original(kind)
        .map(|record| to_preview_html(record.original_value()));

    Ok(Json(DataResponse {
        data: PreviewResponse {
            current_html: to_preview_html(row.item.current_value(kind)),
            is_reverted: row.is_reverted(kind),
            original_html,
            kind,
            item_id,
        },
    }))
}

/// POST /api/v1/dashboard/revert
pub async fn revert(
    State(state): State<AppState>,
    Json(input): Json<RevertRequest>,
) -> AppResult<impl IntoResponse> {
    let row = workflow::load_row(
        state.catalog.as_ref(),
        state.content_store.as_ref(),
        &input.item_id,
        input.item_type,
    )
    .await?;

    let data = match workflow::revert(&row, input.content_kind, state.catalog.as_ref()).await? {
        RevertOutcome::Reverted(updated) => RevertResponse {
            reverted: true,
            row: updated,
        },
        RevertOutcome::AlreadyReverted => RevertResponse {
            reverted: false,
            row,
        },
    };

    Ok(Json(DataResponse { data }))
}
