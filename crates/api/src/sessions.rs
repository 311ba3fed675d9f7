//! In-memory store for generation sessions.
//!
//! Each browser tab drives its own [`GenerationSession`], addressed by a
//! UUID. Snapshots are replaced wholesale on every transition; idle sessions
//! are swept after the configured TTL.
//!
//! Transitions run under the write lock, so two requests for the same
//! session cannot both start a remote step: the first stores the busy
//! phase and the second is rejected by the session's phase checks.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use copydesk_core::error::CoreError;
use copydesk_core::session::GenerationSession;
use copydesk_core::types::ContentKind;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// How often the sweeper looks for expired sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Thread-safe session map, designed to be wrapped in `Arc` and shared.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, GenerationSession>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create an idle session and return its id with the initial snapshot.
    pub async fn create(&self, content_kind: ContentKind) -> (Uuid, GenerationSession) {
        let id = Uuid::new_v4();
        let session = GenerationSession::new(content_kind);
        self.sessions.write().await.insert(id, session.clone());
        tracing::debug!(session_id = %id, kind = %content_kind, "Session created");
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Result<GenerationSession, CoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Apply `transition` to the stored snapshot and store its result.
    ///
    /// Returns the snapshots before and after. Nothing is stored when the
    /// transition fails.
    pub async fn swap<F>(
        &self,
        id: Uuid,
        transition: F,
    ) -> Result<(GenerationSession, GenerationSession), CoreError>
    where
        F: FnOnce(&GenerationSession) -> Result<GenerationSession, CoreError>,
    {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        let next = transition(&*slot)?;
        let previous = std::mem::replace(slot, next.clone());
        Ok((previous, next))
    }

    /// Like [`swap`](Self::swap), returning only the stored snapshot.
    pub async fn update<F>(&self, id: Uuid, transition: F) -> Result<GenerationSession, CoreError>
    where
        F: FnOnce(&GenerationSession) -> Result<GenerationSession, CoreError>,
    {
        self.swap(id, transition).await.map(|(_, next)| next)
    }

    /// Store the outcome of a remote step started from `pending`.
    ///
    /// The outcome is dropped if the session was reset, removed or swept
    /// while the step was in flight. Returns whether it was stored.
    pub async fn complete(
        &self,
        id: Uuid,
        pending: &GenerationSession,
        outcome: GenerationSession,
    ) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(slot) if *slot == *pending => {
                *slot = outcome;
                true
            }
            Some(slot) => {
                tracing::warn!(
                    session_id = %id,
                    phase = %slot.phase,
                    "Session changed during a remote step; discarding its outcome"
                );
                false
            }
            None => {
                tracing::warn!(session_id = %id, "Session removed during a remote step");
                false
            }
        }
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), CoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop sessions idle for longer than the TTL. Returns how many were
    /// removed.
    pub async fn sweep_expired(&self) -> usize {
        let Ok(ttl) = chrono::Duration::from_std(self.ttl) else {
            return 0;
        };
        let cutoff = Utc::now() - ttl;

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at > cutoff);
        before - sessions.len()
    }
}

fn not_found(id: Uuid) -> CoreError {
    CoreError::NotFound {
        entity: "Session",
        id: id.to_string(),
    }
}

/// Spawn the expiry sweeper. Runs until `cancel` is triggered.
pub fn start_sweeper(
    store: Arc<SessionStore>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Session sweeper stopping");
                    break;
                }
                _ = interval.tick() => {
                    let removed = store.sweep_expired().await;
                    if removed > 0 {
                        tracing::info!(removed, "Expired idle sessions");
                    } else {
                        tracing::debug!("Session sweep: nothing expired");
                    }
                }
            }
        }
    })
}
