//! Handlers for generation sessions.
//!
//! Every transition is applied to the stored snapshot under the store's
//! lock. Remote steps first store the busy phase, then store their outcome
//! once the call returns. Remote failures store the failed snapshot before
//! the error is returned, so a follow-up `GET` shows the session's failure
//! phase.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use copydesk_core::error::CoreError;
use copydesk_core::preview::to_preview_html;
use copydesk_core::session::GenerationSession;
use copydesk_core::types::{ContentKind, ItemType};
use copydesk_core::workflow::{self, StepResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub content_kind: ContentKind,
}

#[derive(Debug, Deserialize)]
pub struct SelectItemRequest {
    pub item_id: String,
    pub item_type: ItemType,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub keywords: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveEditRequest {
    pub content: String,
}

/// A session snapshot as returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub session: GenerationSession,
    /// Preview HTML of the content that would be published.
    pub preview_html: Option<String>,
}

impl SessionResponse {
    fn new(id: Uuid, session: GenerationSession) -> Self {
        let preview_html = session.content().map(to_preview_html);
        Self {
            id,
            session,
            preview_html,
        }
    }
}

fn respond(id: Uuid, session: GenerationSession) -> Json<DataResponse<SessionResponse>> {
    Json(DataResponse {
        data: SessionResponse::new(id, session),
    })
}

/// Apply a local transition and respond with the stored snapshot.
async fn advance<F>(
    state: &AppState,
    id: Uuid,
    transition: F,
) -> AppResult<Json<DataResponse<SessionResponse>>>
where
    F: FnOnce(&GenerationSession) -> Result<GenerationSession, CoreError>,
{
    let next = state.sessions.update(id, transition).await?;
    Ok(respond(id, next))
}

/// Store the outcome of a remote step started from `pending`; surface its
/// error if it failed.
///
/// When the step could not run at all the session goes back to `previous`.
async fn settle(
    state: &AppState,
    id: Uuid,
    previous: GenerationSession,
    pending: &GenerationSession,
    result: Result<StepResult, CoreError>,
) -> AppResult<Json<DataResponse<SessionResponse>>> {
    match result {
        Ok(StepResult::Advanced(session)) => {
            state.sessions.complete(id, pending, session.clone()).await;
            Ok(respond(id, session))
        }
        Ok(StepResult::Failed { session, error }) => {
            state.sessions.complete(id, pending, session).await;
            Err(error.into())
        }
        Err(error) => {
            state.sessions.complete(id, pending, previous).await;
            Err(error.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSessionRequest>,
) -> AppResult<impl IntoResponse> {
    let (id, session) = state.sessions.create(input.content_kind).await;
    Ok((StatusCode::CREATED, respond(id, session)))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(id).await?;
    Ok(respond(id, session))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions/{id}/select
pub async fn select_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SelectItemRequest>,
) -> AppResult<impl IntoResponse> {
    state.sessions.get(id).await?;
    let item = state
        .catalog
        .get_item(&input.item_id, input.item_type)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Catalog item",
            id: input.item_id.clone(),
        })?;

    advance(&state, id, |session| session.select(item)).await
}

/// POST /api/v1/sessions/{id}/generate
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let (previous, pending) = state
        .sessions
        .swap(id, |session| session.begin_generate(&input.keywords))
        .await?;
    let result = workflow::complete_generation(&pending, state.generator.as_ref()).await;
    settle(&state, id, previous, &pending, result).await
}

/// POST /api/v1/sessions/{id}/edit
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    advance(&state, id, GenerationSession::begin_edit).await
}

/// POST /api/v1/sessions/{id}/save
pub async fn save_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SaveEditRequest>,
) -> AppResult<impl IntoResponse> {
    advance(&state, id, |session| session.save_edit(&input.content)).await
}

/// POST /api/v1/sessions/{id}/cancel-edit
pub async fn cancel_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    advance(&state, id, GenerationSession::cancel_edit).await
}

/// POST /api/v1/sessions/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (previous, pending) = state
        .sessions
        .swap(id, GenerationSession::begin_publish)
        .await?;
    let result = workflow::complete_publish(
        &pending,
        state.catalog.as_ref(),
        state.content_store.as_ref(),
    )
    .await;
    settle(&state, id, previous, &pending, result).await
}

/// POST /api/v1/sessions/{id}/reset
pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    advance(&state, id, |session| Ok(session.reset())).await
}
