//! Generation session state machine.
//!
//! A [`GenerationSession`] is an immutable snapshot. Every transition takes
//! `&self` and returns a new snapshot, or a [`CoreError::Validation`] when
//! the transition is not allowed from the current phase.
//!
//! ```text
//! Idle -> select -> ItemSelected -> begin_generate -> Generating
//! Generating -> Generated | GenerationFailed
//! Generated | PublishFailed -> begin_edit -> Editing
//! Editing -> save_edit | cancel_edit -> Generated
//! Generated | PublishFailed -> begin_publish -> Publishing
//! Publishing -> Published | PublishFailed | publish_aborted -> Generated
//! any -> reset -> Idle
//! ```

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{CatalogItem, ContentKind, Timestamp};

/// Where a session is in the generate/edit/publish flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    ItemSelected,
    Generating,
    Generated,
    GenerationFailed { message: String },
    Editing,
    Publishing,
    Published,
    PublishFailed { message: String },
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ItemSelected => "item_selected",
            Self::Generating => "generating",
            Self::Generated => "generated",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::Editing => "editing",
            Self::Publishing => "publishing",
            Self::Published => "published",
            Self::PublishFailed { .. } => "publish_failed",
        }
    }

    /// Phases with a remote call outstanding.
    fn is_busy(&self) -> bool {
        matches!(self, Self::Generating | Self::Publishing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSession {
    pub content_kind: ContentKind,
    #[serde(flatten)]
    pub phase: Phase,
    pub item: Option<CatalogItem>,
    pub keywords: String,
    /// Normalized output of the last successful generation.
    pub generated: Option<String>,
    /// Merchant's saved edit; takes precedence over `generated`.
    pub edited: Option<String>,
    pub updated_at: Timestamp,
}

impl GenerationSession {
    pub fn new(content_kind: ContentKind) -> Self {
        Self {
            content_kind,
            phase: Phase::Idle,
            item: None,
            keywords: String::new(),
            generated: None,
            edited: None,
            updated_at: chrono::Utc::now(),
        }
    }

    /// The content that would be published: the saved edit if present,
    /// otherwise the generated text. Empty values count as absent.
    pub fn content(&self) -> Option<&str> {
        self.edited
            .as_deref()
            .or(self.generated.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    // -- Transitions --

    /// Select the item to generate for. Clears any previous generation.
    pub fn select(&self, item: CatalogItem) -> Result<Self, CoreError> {
        self.ensure_idle_for("select an item")?;
        Ok(Self {
            phase: Phase::ItemSelected,
            item: Some(item),
            generated: None,
            edited: None,
            ..self.touched()
        })
    }

    /// Validate the selection and keywords and enter `Generating`.
    pub fn begin_generate(&self, keywords: &str) -> Result<Self, CoreError> {
        if self.item.is_none() {
            return Err(CoreError::Validation(
                "Please select a product or collection first".to_string(),
            ));
        }
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(CoreError::Validation(
                "Please enter keywords before generating".to_string(),
            ));
        }
        self.ensure_idle_for("generate")?;
        if self.phase == Phase::Editing {
            return Err(self.invalid("generate"));
        }
        Ok(Self {
            phase: Phase::Generating,
            keywords: keywords.to_string(),
            ..self.touched()
        })
    }

    pub fn generation_succeeded(&self, content: String) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Generating, "complete generation")?;
        Ok(Self {
            phase: Phase::Generated,
            generated: Some(content),
            edited: None,
            ..self.touched()
        })
    }

    pub fn generation_failed(&self, message: String) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Generating, "fail generation")?;
        Ok(Self {
            phase: Phase::GenerationFailed { message },
            ..self.touched()
        })
    }

    /// Open the editor. Allowed after a failed publish so the merchant can
    /// fix content the catalog rejected.
    pub fn begin_edit(&self) -> Result<Self, CoreError> {
        match self.phase {
            Phase::Generated | Phase::PublishFailed { .. } => Ok(Self {
                phase: Phase::Editing,
                ..self.touched()
            }),
            _ => Err(self.invalid("edit")),
        }
    }

    pub fn save_edit(&self, content: &str) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Editing, "save an edit")?;
        if content.trim().is_empty() {
            return Err(CoreError::Validation(
                "Edited content must not be empty".to_string(),
            ));
        }
        Ok(Self {
            phase: Phase::Generated,
            edited: Some(content.to_string()),
            ..self.touched()
        })
    }

    pub fn cancel_edit(&self) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Editing, "cancel an edit")?;
        Ok(Self {
            phase: Phase::Generated,
            ..self.touched()
        })
    }

    /// Validate the selection and content and enter `Publishing`.
    pub fn begin_publish(&self) -> Result<Self, CoreError> {
        if self.item.is_none() {
            return Err(CoreError::Validation(
                "Please select a product or collection first".to_string(),
            ));
        }
        if self.content().is_none() {
            return Err(CoreError::Validation(
                "Generate or edit content before publishing".to_string(),
            ));
        }
        match self.phase {
            Phase::Generated | Phase::PublishFailed { .. } => Ok(Self {
                phase: Phase::Publishing,
                ..self.touched()
            }),
            _ => Err(self.invalid("publish")),
        }
    }

    /// Snapshot reflecting `item` as live while the catalog call is pending.
    pub fn with_item(&self, item: CatalogItem) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Publishing, "update the item")?;
        Ok(Self {
            item: Some(item),
            ..self.touched()
        })
    }

    pub fn publish_succeeded(&self, item: CatalogItem) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Publishing, "complete publishing")?;
        Ok(Self {
            phase: Phase::Published,
            item: Some(item),
            ..self.touched()
        })
    }

    pub fn publish_failed(&self, message: String) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Publishing, "fail publishing")?;
        Ok(Self {
            phase: Phase::PublishFailed { message },
            ..self.touched()
        })
    }

    /// Leave `Publishing` with nothing written anywhere. Content is kept.
    pub fn publish_aborted(&self) -> Result<Self, CoreError> {
        self.expect_phase(&Phase::Publishing, "abort publishing")?;
        Ok(Self {
            phase: Phase::Generated,
            ..self.touched()
        })
    }

    /// Whether a remote call is outstanding for this session.
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Discard everything and return to `Idle`.
    pub fn reset(&self) -> Self {
        Self::new(self.content_kind)
    }

    // -- Helpers --

    fn touched(&self) -> Self {
        Self {
            updated_at: chrono::Utc::now(),
            ..self.clone()
        }
    }

    fn invalid(&self, action: &str) -> CoreError {
        CoreError::Validation(format!("Cannot {action} while the session is {}", self.phase))
    }

    fn expect_phase(&self, expected: &Phase, action: &str) -> Result<(), CoreError> {
        if std::mem::discriminant(&self.phase) == std::mem::discriminant(expected) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn ensure_idle_for(&self, action: &str) -> Result<(), CoreError> {
        if self.phase.is_busy() {
            Err(self.invalid(action))
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
