#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use copydesk_api::config::{ServerConfig, ServiceConfig};
use copydesk_api::router::build_app_router;
use copydesk_api::sessions::SessionStore;
use copydesk_api::state::AppState;
use copydesk_core::error::CoreError;
use copydesk_core::normalize::GeneratedContent;
use copydesk_core::ports::{
    BaselineRecord, CatalogService, CatalogUpdate, ContentGenerator, ContentStore,
    GenerationRequest,
};
use copydesk_core::types::{CatalogItem, ContentKind, ItemType, OriginalContentRecord};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        session_ttl_secs: 3600,
        services: ServiceConfig {
            catalog_api_url: "http://127.0.0.1:9/graphql".to_string(),
            catalog_access_token: String::new(),
            catalog_page_size: 50,
            ai_service_url: "http://127.0.0.1:9".to_string(),
            content_store_url: "http://127.0.0.1:9".to_string(),
            content_store_timeout_secs: 1,
        },
    }
}

// ---------------------------------------------------------------------------
// Fake services
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeCatalog {
    pub items: Mutex<Vec<CatalogItem>>,
    pub fail_update: bool,
    pub updates: Mutex<Vec<CatalogUpdate>>,
}

impl FakeCatalog {
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn list_items(&self, item_type: ItemType) -> Vec<CatalogItem> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.item_type == item_type)
            .cloned()
            .collect()
    }

    async fn get_item(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Option<CatalogItem>, CoreError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == item_id && i.item_type == item_type)
            .cloned())
    }

    async fn update_item(&self, update: &CatalogUpdate) -> Result<CatalogItem, CoreError> {
        self.updates.lock().unwrap().push(update.clone());
        if self.fail_update {
            return Err(CoreError::Upstream("descriptionHtml: is invalid".into()));
        }

        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == update.item_id)
            .ok_or_else(|| CoreError::Upstream("No data returned".into()))?;
        let mut next = item.clone();
        if let Some(html) = &update.description_html {
            next = next.with_value(ContentKind::Description, html);
        }
        if let Some(seo) = &update.seo_description {
            next = next.with_value(ContentKind::SeoDescription, seo);
        }
        *item = next.clone();
        Ok(next)
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub records: Vec<OriginalContentRecord>,
    pub fail: bool,
    /// Holds `record_baseline` open so requests can overlap.
    pub delay: Option<Duration>,
    pub baselines: Mutex<Vec<BaselineRecord>>,
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn list_records(&self) -> Vec<OriginalContentRecord> {
        self.records.clone()
    }

    async fn record_baseline(&self, baseline: &BaselineRecord) -> Result<(), CoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(CoreError::Unavailable("store down".into()));
        }
        self.baselines.lock().unwrap().push(baseline.clone());
        Ok(())
    }
}

pub enum FakeReply {
    Content(GeneratedContent),
    RateLimited,
}

pub struct FakeGenerator {
    pub reply: FakeReply,
    pub calls: Mutex<usize>,
}

impl FakeGenerator {
    pub fn replying(message: &str) -> Self {
        Self {
            reply: FakeReply::Content(GeneratedContent::Structured {
                message: message.to_string(),
            }),
            calls: Mutex::new(0),
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            reply: FakeReply::RateLimited,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<GeneratedContent, CoreError> {
        *self.calls.lock().unwrap() += 1;
        match &self.reply {
            FakeReply::Content(content) => Ok(content.clone()),
            FakeReply::RateLimited => Err(CoreError::RateLimited),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn product(id: &str, title: &str, html: &str, seo: Option<&str>) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: title.to_string(),
        description: copydesk_core::normalize::strip_tags(html),
        description_html: html.to_string(),
        seo_description: seo.map(str::to_string),
        image_url: None,
        updated_at: None,
        item_type: ItemType::Product,
    }
}

pub fn collection(id: &str, title: &str, html: &str) -> CatalogItem {
    CatalogItem {
        item_type: ItemType::Collection,
        ..product(id, title, html, None)
    }
}

pub fn record(origin_id: &str, kind: ContentKind, original: &str) -> OriginalContentRecord {
    OriginalContentRecord {
        origin_id: origin_id.to_string(),
        content_kind: kind,
        original_content: Some(original.to_string()),
        original_content_html: None,
        created_at: None,
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Services behind a test app, kept so tests can inspect calls.
pub struct TestServices {
    pub catalog: Arc<FakeCatalog>,
    pub store: Arc<FakeStore>,
    pub generator: Arc<FakeGenerator>,
    pub sessions: Arc<SessionStore>,
}

impl TestServices {
    pub fn new(catalog: FakeCatalog, store: FakeStore, generator: FakeGenerator) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store: Arc::new(store),
            generator: Arc::new(generator),
            sessions: Arc::new(SessionStore::new(Duration::from_secs(3600))),
        }
    }

    /// Build the full application router over these services.
    ///
    /// Uses the same builder as `main.rs`, so integration tests exercise the
    /// production middleware stack.
    pub fn app(&self) -> Router {
        let config = test_config();
        let state = AppState {
            config: Arc::new(config.clone()),
            catalog: self.catalog.clone(),
            content_store: self.store.clone(),
            generator: self.generator.clone(),
            sessions: Arc::clone(&self.sessions),
        };
        build_app_router(state, &config)
    }
}

/// Build an app with empty fakes.
pub fn build_test_app() -> Router {
    TestServices::new(
        FakeCatalog::default(),
        FakeStore::default(),
        FakeGenerator::replying("unused"),
    )
    .app()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
