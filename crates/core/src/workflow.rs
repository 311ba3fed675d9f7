//! Generate, publish, revert and dashboard-load workflows.
//!
//! Each workflow validates locally first and returns
//! [`CoreError::Validation`] without touching any service when a
//! precondition fails. Remote failures after validation are reported
//! alongside the resulting session snapshot via [`StepResult::Failed`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::normalize;
use crate::ports::{
    BaselineRecord, CatalogService, CatalogUpdate, ContentGenerator, ContentStore,
    GenerationRequest,
};
use crate::reconcile::{self, Dashboard, DashboardRow};
use crate::session::{GenerationSession, Phase};
use crate::types::{CatalogItem, ContentKind, ItemType};

/// Outcome of driving a session through a remote step.
#[derive(Debug)]
pub enum StepResult {
    Advanced(GenerationSession),
    Failed {
        session: GenerationSession,
        error: CoreError,
    },
}

impl StepResult {
    pub fn session(&self) -> &GenerationSession {
        match self {
            Self::Advanced(session) | Self::Failed { session, .. } => session,
        }
    }
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

/// Generate content for the session's selected item.
pub async fn generate(
    session: &GenerationSession,
    keywords: &str,
    generator: &dyn ContentGenerator,
) -> Result<StepResult, CoreError> {
    let pending = session.begin_generate(keywords)?;
    complete_generation(&pending, generator).await
}

/// Run the AI call for a session already in `Generating`.
///
/// Callers that share sessions across requests persist the `Generating`
/// snapshot first so a concurrent step sees the session as busy.
pub async fn complete_generation(
    pending: &GenerationSession,
    generator: &dyn ContentGenerator,
) -> Result<StepResult, CoreError> {
    if pending.phase != Phase::Generating {
        return Err(CoreError::Validation(format!(
            "Cannot generate while the session is {}",
            pending.phase
        )));
    }
    let Some(item) = pending.item.as_ref() else {
        return Err(CoreError::Internal("Generating session has no item".into()));
    };

    let request = GenerationRequest {
        keywords: pending.keywords.clone(),
        page_type: item.item_type,
        content_type: pending.content_kind,
        item_name: item.title.clone(),
    };
    tracing::info!(
        item_id = %item.id,
        kind = %pending.content_kind,
        "Requesting AI content"
    );

    let outcome = match generator.generate(&request).await {
        Ok(content) => {
            let text = normalize::normalize(content, pending.content_kind);
            if text.is_empty() {
                let error = CoreError::Upstream("The AI service returned no content".into());
                StepResult::Failed {
                    session: pending.generation_failed(error.user_message())?,
                    error,
                }
            } else {
                StepResult::Advanced(pending.generation_succeeded(text)?)
            }
        }
        Err(error) => {
            tracing::warn!(item_id = %item.id, error = %error, "AI generation failed");
            StepResult::Failed {
                session: pending.generation_failed(error.user_message())?,
                error,
            }
        }
    };
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

/// Publish the session's content.
///
/// Runs as a sequential saga:
/// 1. record the item's current value as the baseline in the content store.
///    If this fails nothing was written and the session returns to
///    `Generated`;
/// 2. stage an optimistic snapshot with the new content applied;
/// 3. mutate the catalog. If this fails the optimistic snapshot is discarded
///    and the session reports [`CoreError::PartialPublish`], since the
///    baseline is already recorded.
pub async fn publish(
    session: &GenerationSession,
    catalog: &dyn CatalogService,
    store: &dyn ContentStore,
) -> Result<StepResult, CoreError> {
    let pending = session.begin_publish()?;
    complete_publish(&pending, catalog, store).await
}

/// Run the publish saga for a session already in `Publishing`.
pub async fn complete_publish(
    pending: &GenerationSession,
    catalog: &dyn CatalogService,
    store: &dyn ContentStore,
) -> Result<StepResult, CoreError> {
    if pending.phase != Phase::Publishing {
        return Err(CoreError::Validation(format!(
            "Cannot publish while the session is {}",
            pending.phase
        )));
    }
    let (Some(item), Some(content)) = (pending.item.clone(), pending.content()) else {
        return Err(CoreError::Internal("Publishing session is incomplete".into()));
    };
    let content = content.to_string();
    let kind = pending.content_kind;

    let baseline = BaselineRecord {
        original_content: item.current_value(kind).to_string(),
        content_type: kind,
        origin_type: item.item_type,
        origin_id: item.id.clone(),
    };
    if let Err(error) = store.record_baseline(&baseline).await {
        tracing::warn!(item_id = %item.id, error = %error, "Failed to record original content");
        return Ok(StepResult::Failed {
            session: pending.publish_aborted()?,
            error,
        });
    }

    let optimistic = pending.with_item(item.clone().with_value(kind, &content))?;

    let update = CatalogUpdate::for_kind(&item.id, item.item_type, kind, &content);
    match catalog.update_item(&update).await {
        Ok(updated) => {
            tracing::info!(item_id = %item.id, kind = %kind, "Published AI content");
            Ok(StepResult::Advanced(optimistic.publish_succeeded(updated)?))
        }
        Err(cause) => {
            tracing::error!(
                item_id = %item.id,
                kind = %kind,
                error = %cause,
                "Catalog update failed after baseline was recorded; rolling back local state"
            );
            let error = CoreError::PartialPublish(format!(
                "The original content was saved but the catalog was not updated: {}",
                cause.user_message()
            ));
            Ok(StepResult::Failed {
                session: pending.publish_failed(error.user_message())?,
                error,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Revert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RevertOutcome {
    /// The original was written back; carries the updated row.
    Reverted(DashboardRow),
    /// Nothing to do: the field already holds its original.
    AlreadyReverted,
}

/// Write the stored original for `kind` back to the catalog.
pub async fn revert(
    row: &DashboardRow,
    kind: ContentKind,
    catalog: &dyn CatalogService,
) -> Result<RevertOutcome, CoreError> {
    if !row.has_ai(kind) {
        return Err(CoreError::Validation(format!(
            "No AI-generated {kind} to revert for this item"
        )));
    }
    if row.is_reverted(kind) {
        tracing::info!(item_id = %row.item.id, kind = %kind, "Already reverted");
        return Ok(RevertOutcome::AlreadyReverted);
    }
    let original = row
        .original(kind)
        .map(|r| r.original_value())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            CoreError::Validation(format!("No original {kind} is stored for this item"))
        })?;

    let update = CatalogUpdate::for_kind(&row.item.id, row.item.item_type, kind, original);
    catalog.update_item(&update).await?;

    tracing::info!(item_id = %row.item.id, kind = %kind, "Reverted to original content");
    Ok(RevertOutcome::Reverted(row.mark_reverted(kind, original)))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Load all catalog items and records and reconcile them.
///
/// Products and collections are fetched concurrently; the content store is
/// read afterwards.
pub async fn load_dashboard(catalog: &dyn CatalogService, store: &dyn ContentStore) -> Dashboard {
    let (products, collections) = tokio::join!(
        catalog.list_items(ItemType::Product),
        catalog.list_items(ItemType::Collection)
    );
    let records = store.list_records().await;

    tracing::debug!(
        products = products.len(),
        collections = collections.len(),
        records = records.len(),
        "Reconciling dashboard"
    );

    let items = products.into_iter().chain(collections).collect();
    reconcile::build_dashboard(items, records)
}

/// Load the dashboard row for a single item.
pub async fn load_row(
    catalog: &dyn CatalogService,
    store: &dyn ContentStore,
    item_id: &str,
    item_type: ItemType,
) -> Result<DashboardRow, CoreError> {
    let item = catalog
        .get_item(item_id, item_type)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Catalog item",
            id: item_id.to_string(),
        })?;

    let mut index = reconcile::index_records(store.list_records().await);
    let description = index.remove(&(item.id.clone(), ContentKind::Description));
    let seo = index.remove(&(item.id.clone(), ContentKind::SeoDescription));

    reconcile::build_row(item, description, seo).ok_or_else(|| CoreError::NotFound {
        entity: "Dashboard row",
        id: item_id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Content commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentAction {
    UpdateContent,
    Revert,
}

/// A direct catalog write, as posted by the admin front-end.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCommand {
    pub action: ContentAction,
    pub item_id: String,
    #[serde(alias = "pageType")]
    pub item_type: ItemType,
    #[serde(alias = "contentType")]
    pub content_kind: ContentKind,
    #[serde(alias = "newContent", alias = "originalContent")]
    pub content: String,
}

/// Apply a [`ContentCommand`] to the catalog.
pub async fn apply_content_command(
    command: &ContentCommand,
    catalog: &dyn CatalogService,
) -> Result<CatalogItem, CoreError> {
    if command.item_id.trim().is_empty() {
        return Err(CoreError::Validation("itemId must not be empty".to_string()));
    }
    if command.content.trim().is_empty() {
        let what = match command.action {
            ContentAction::UpdateContent => "New content",
            ContentAction::Revert => "Original content",
        };
        return Err(CoreError::Validation(format!("{what} must not be empty")));
    }

    let update = CatalogUpdate::for_kind(
        &command.item_id,
        command.item_type,
        command.content_kind,
        &command.content,
    );
    let item = catalog.update_item(&update).await?;
    tracing::info!(
        item_id = %command.item_id,
        action = ?command.action,
        kind = %command.content_kind,
        "Applied content command"
    );
    Ok(item)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::normalize::GeneratedContent;
    use crate::types::OriginalContentRecord;

    // -- Fakes --

    #[derive(Default)]
    struct FakeCatalog {
        items: Vec<CatalogItem>,
        fail_update: bool,
        updates: Mutex<Vec<CatalogUpdate>>,
    }

    #[async_trait]
    impl CatalogService for FakeCatalog {
        async fn list_items(&self, item_type: ItemType) -> Vec<CatalogItem> {
            self.items
                .iter()
                .filter(|i| i.item_type == item_type)
                .cloned()
                .collect()
        }

        async fn get_item(
            &self,
            item_id: &str,
            _item_type: ItemType,
        ) -> Result<Option<CatalogItem>, CoreError> {
            Ok(self.items.iter().find(|i| i.id == item_id).cloned())
        }

        async fn update_item(&self, update: &CatalogUpdate) -> Result<CatalogItem, CoreError> {
            self.updates.lock().unwrap().push(update.clone());
            if self.fail_update {
                return Err(CoreError::Upstream("descriptionHtml: is invalid".into()));
            }
            let mut item = self
                .items
                .iter()
                .find(|i| i.id == update.item_id)
                .cloned()
                .ok_or_else(|| CoreError::Upstream("No data returned".into()))?;
            if let Some(html) = &update.description_html {
                item = item.with_value(ContentKind::Description, html);
            }
            if let Some(seo) = &update.seo_description {
                item = item.with_value(ContentKind::SeoDescription, seo);
            }
            Ok(item)
        }
    }

    #[derive(Default)]
    struct FakeStore {
        records: Vec<OriginalContentRecord>,
        fail: bool,
        baselines: Mutex<Vec<BaselineRecord>>,
    }

    #[async_trait]
    impl ContentStore for FakeStore {
        async fn list_records(&self) -> Vec<OriginalContentRecord> {
            self.records.clone()
        }

        async fn record_baseline(&self, baseline: &BaselineRecord) -> Result<(), CoreError> {
            if self.fail {
                return Err(CoreError::Unavailable("store down".into()));
            }
            self.baselines.lock().unwrap().push(baseline.clone());
            Ok(())
        }
    }

    struct FakeGenerator {
        response: Result<GeneratedContent, fn() -> CoreError>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FakeGenerator {
        fn replying(content: GeneratedContent) -> Self {
            Self {
                response: Ok(content),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: fn() -> CoreError) -> Self {
            Self {
                response: Err(error),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ContentGenerator for FakeGenerator {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GeneratedContent, CoreError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone().map_err(|make| make())
        }
    }

    fn blue_mug() -> CatalogItem {
        CatalogItem {
            id: "gid://shop/Product/7".into(),
            title: "Blue Mug".into(),
            description: "A plain mug".into(),
            description_html: "<p>A plain mug</p>".into(),
            seo_description: Some("Mug".into()),
            image_url: None,
            updated_at: None,
            item_type: ItemType::Product,
        }
    }

    fn bullet_reply() -> GeneratedContent {
        GeneratedContent::from_json(serde_json::json!({
            "message": "• Durable\n• Dishwasher safe"
        }))
    }

    fn selected() -> GenerationSession {
        GenerationSession::new(ContentKind::Description)
            .select(blue_mug())
            .unwrap()
    }

    async fn generated_session() -> GenerationSession {
        let generator = FakeGenerator::replying(bullet_reply());
        match generate(&selected(), "ceramic, dishwasher-safe", &generator)
            .await
            .unwrap()
        {
            StepResult::Advanced(session) => session,
            other => panic!("unexpected {other:?}"),
        }
    }

    // -- Generate --

    #[tokio::test]
    async fn generate_without_item_makes_no_call() {
        let generator = FakeGenerator::replying(bullet_reply());
        let session = GenerationSession::new(ContentKind::Description);
        let err = generate(&session, "ceramic", &generator).await.unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn generate_without_keywords_makes_no_call() {
        let generator = FakeGenerator::replying(bullet_reply());
        let err = generate(&selected(), "", &generator).await.unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn generate_sends_item_context_and_normalizes() {
        let generator = FakeGenerator::replying(bullet_reply());
        let result = generate(&selected(), "ceramic, dishwasher-safe", &generator)
            .await
            .unwrap();

        let session = result.session();
        assert_eq!(session.phase, Phase::Generated);
        assert_eq!(
            session.content(),
            Some("<ul><li>Durable</li><li>Dishwasher safe</li></ul>")
        );

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests[0].item_name, "Blue Mug");
        assert_eq!(requests[0].keywords, "ceramic, dishwasher-safe");
        assert_eq!(requests[0].page_type, ItemType::Product);
    }

    #[tokio::test]
    async fn rate_limit_maps_to_usage_message() {
        let generator = FakeGenerator::failing(|| CoreError::RateLimited);
        let result = generate(&selected(), "ceramic", &generator).await.unwrap();
        assert_matches!(&result, StepResult::Failed { error: CoreError::RateLimited, .. });
        assert_matches!(
            &result.session().phase,
            Phase::GenerationFailed { message } if message.contains("Usage limit reached")
        );
    }

    #[tokio::test]
    async fn empty_generation_is_a_failure() {
        let generator = FakeGenerator::replying(GeneratedContent::RawText("  \n ".into()));
        let result = generate(&selected(), "ceramic", &generator).await.unwrap();
        assert_matches!(result, StepResult::Failed { error: CoreError::Upstream(_), .. });
    }

    // -- Publish --

    #[tokio::test]
    async fn publish_records_baseline_then_updates_catalog() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            ..Default::default()
        };
        let store = FakeStore::default();
        let session = generated_session().await;

        let result = publish(&session, &catalog, &store).await.unwrap();
        let published = result.session();
        assert_eq!(published.phase, Phase::Published);

        let baselines = store.baselines.lock().unwrap();
        assert_eq!(baselines[0].original_content, "<p>A plain mug</p>");
        assert_eq!(baselines[0].content_type, ContentKind::Description);
        assert_eq!(baselines[0].origin_id, "gid://shop/Product/7");

        let updates = catalog.updates.lock().unwrap();
        assert_eq!(
            updates[0].description_html.as_deref(),
            Some("<ul><li>Durable</li><li>Dishwasher safe</li></ul>")
        );
        assert_eq!(updates[0].seo_description, None);
        assert_eq!(
            published.item.as_ref().unwrap().description_html,
            "<ul><li>Durable</li><li>Dishwasher safe</li></ul>"
        );
    }

    #[tokio::test]
    async fn baseline_failure_aborts_without_catalog_call() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            ..Default::default()
        };
        let store = FakeStore {
            fail: true,
            ..Default::default()
        };
        let session = generated_session().await;

        let result = publish(&session, &catalog, &store).await.unwrap();
        assert_matches!(&result, StepResult::Failed { error: CoreError::Unavailable(_), .. });
        assert!(catalog.updates.lock().unwrap().is_empty());

        let session = result.session();
        assert_eq!(session.phase, Phase::Generated);
        assert_eq!(session.item, Some(blue_mug()));
        assert!(session.begin_edit().is_ok());
        assert!(session.begin_publish().is_ok());
    }

    #[tokio::test]
    async fn catalog_failure_rolls_back_optimistic_item() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            fail_update: true,
            ..Default::default()
        };
        let store = FakeStore::default();
        let session = generated_session().await;

        let result = publish(&session, &catalog, &store).await.unwrap();
        assert_matches!(&result, StepResult::Failed { error: CoreError::PartialPublish(_), .. });

        let failed = result.session();
        assert_matches!(failed.phase, Phase::PublishFailed { .. });
        assert_eq!(failed.item, Some(blue_mug()));
        assert_eq!(store.baselines.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejected_content_can_be_edited_and_republished() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            fail_update: true,
            ..Default::default()
        };
        let store = FakeStore::default();
        let session = generated_session().await;

        let failed = publish(&session, &catalog, &store).await.unwrap();
        let edited = failed
            .session()
            .begin_edit()
            .unwrap()
            .save_edit("<p>Plain text only</p>")
            .unwrap();
        assert_eq!(edited.content(), Some("<p>Plain text only</p>"));
        assert_eq!(edited.begin_publish().unwrap().phase, Phase::Publishing);
    }

    #[tokio::test]
    async fn complete_steps_require_busy_phase() {
        let catalog = FakeCatalog::default();
        let store = FakeStore::default();
        let generator = FakeGenerator::replying(bullet_reply());
        let session = generated_session().await;

        let err = complete_publish(&session, &catalog, &store).await.unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        let err = complete_generation(&session, &generator).await.unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(generator.calls(), 0);
        assert!(store.baselines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn publish_without_content_is_validation_error() {
        let catalog = FakeCatalog::default();
        let store = FakeStore::default();
        let err = publish(&selected(), &catalog, &store).await.unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
        assert!(store.baselines.lock().unwrap().is_empty());
    }

    // -- Revert --

    fn row_for(current_html: &str, original: &str) -> DashboardRow {
        let mut item = blue_mug();
        item.description_html = current_html.into();
        reconcile::build_row(
            item,
            Some(OriginalContentRecord {
                origin_id: "gid://shop/Product/7".into(),
                content_kind: ContentKind::Description,
                original_content: Some(original.into()),
                original_content_html: None,
                created_at: None,
            }),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn revert_writes_original_back() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            ..Default::default()
        };
        let row = row_for("<p>AI copy</p>", "<p>Handwritten</p>");

        let outcome = revert(&row, ContentKind::Description, &catalog).await.unwrap();
        let RevertOutcome::Reverted(updated) = outcome else {
            panic!("expected revert");
        };
        assert!(updated.is_description_reverted);
        assert_eq!(updated.item.description_html, "<p>Handwritten</p>");
        assert_eq!(
            catalog.updates.lock().unwrap()[0].description_html.as_deref(),
            Some("<p>Handwritten</p>")
        );
    }

    #[tokio::test]
    async fn revert_of_reverted_row_is_informational() {
        let catalog = FakeCatalog::default();
        let row = row_for("<p>Hello World</p>", "Hello World");
        assert!(row.is_description_reverted);

        let outcome = revert(&row, ContentKind::Description, &catalog).await.unwrap();
        assert_eq!(outcome, RevertOutcome::AlreadyReverted);
        assert!(catalog.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn revert_without_ai_content_is_rejected() {
        let catalog = FakeCatalog::default();
        let row = row_for("<p>AI</p>", "Orig");
        let err = revert(&row, ContentKind::SeoDescription, &catalog)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[tokio::test]
    async fn revert_with_empty_original_is_rejected() {
        let catalog = FakeCatalog::default();
        let row = row_for("<p>AI</p>", "   ");
        let err = revert(&row, ContentKind::Description, &catalog)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("No original"));
        assert!(catalog.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_revert_mutation_propagates() {
        let catalog = FakeCatalog {
            fail_update: true,
            ..Default::default()
        };
        let row = row_for("<p>AI</p>", "Orig");
        let err = revert(&row, ContentKind::Description, &catalog)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Upstream(_));
    }

    // -- Dashboard --

    #[tokio::test]
    async fn dashboard_joins_products_and_collections() {
        let mut collection = blue_mug();
        collection.id = "gid://shop/Collection/1".into();
        collection.item_type = ItemType::Collection;

        let catalog = FakeCatalog {
            items: vec![blue_mug(), collection],
            ..Default::default()
        };
        let store = FakeStore {
            records: vec![OriginalContentRecord {
                origin_id: "gid://shop/Collection/1".into(),
                content_kind: ContentKind::SeoDescription,
                original_content: Some("Old".into()),
                original_content_html: None,
                created_at: None,
            }],
            ..Default::default()
        };

        let dashboard = load_dashboard(&catalog, &store).await;
        assert_eq!(dashboard.rows.len(), 1);
        assert_eq!(dashboard.summary.collection_count, 1);
        assert_eq!(dashboard.summary.product_count, 0);
    }

    #[tokio::test]
    async fn load_row_joins_single_item() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            ..Default::default()
        };
        let store = FakeStore {
            records: vec![OriginalContentRecord {
                origin_id: "gid://shop/Product/7".into(),
                content_kind: ContentKind::Description,
                original_content: Some("A plain mug".into()),
                original_content_html: None,
                created_at: None,
            }],
            ..Default::default()
        };

        let row = load_row(&catalog, &store, "gid://shop/Product/7", ItemType::Product)
            .await
            .unwrap();
        assert!(row.has_ai_description);
        assert!(row.is_description_reverted);
        assert!(!row.has_ai_seo);
    }

    #[tokio::test]
    async fn load_row_without_records_is_not_found() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            ..Default::default()
        };
        let err = load_row(
            &catalog,
            &FakeStore::default(),
            "gid://shop/Product/7",
            ItemType::Product,
        )
        .await
        .unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Dashboard row", .. });
    }

    #[tokio::test]
    async fn load_row_for_unknown_item_is_not_found() {
        let err = load_row(
            &FakeCatalog::default(),
            &FakeStore::default(),
            "missing",
            ItemType::Collection,
        )
        .await
        .unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Catalog item", .. });
    }

    // -- Content commands --

    #[test]
    fn content_command_accepts_front_end_shape() {
        let command: ContentCommand = serde_json::from_value(serde_json::json!({
            "action": "updateContent",
            "itemId": "gid://shop/Product/7",
            "pageType": "product",
            "contentType": "seo-description",
            "newContent": "Fresh",
        }))
        .unwrap();
        assert_eq!(command.action, ContentAction::UpdateContent);
        assert_eq!(command.content_kind, ContentKind::SeoDescription);
        assert_eq!(command.content, "Fresh");
    }

    #[tokio::test]
    async fn content_command_rejects_empty_content() {
        let catalog = FakeCatalog::default();
        let command = ContentCommand {
            action: ContentAction::Revert,
            item_id: "1".into(),
            item_type: ItemType::Product,
            content_kind: ContentKind::Description,
            content: " ".into(),
        };
        let err = apply_content_command(&command, &catalog).await.unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.starts_with("Original content"));
        assert!(catalog.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn content_command_updates_seo_field() {
        let catalog = FakeCatalog {
            items: vec![blue_mug()],
            ..Default::default()
        };
        let command = ContentCommand {
            action: ContentAction::UpdateContent,
            item_id: "gid://shop/Product/7".into(),
            item_type: ItemType::Product,
            content_kind: ContentKind::SeoDescription,
            content: "Fresh".into(),
        };
        let item = apply_content_command(&command, &catalog).await.unwrap();
        assert_eq!(item.seo_description.as_deref(), Some("Fresh"));
    }
}
