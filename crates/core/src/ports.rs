//! Contracts for the external systems the workflows talk to.
//!
//! Concrete HTTP clients live in `copydesk-catalog` and `copydesk-content`;
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::normalize::GeneratedContent;
use crate::types::{CatalogItem, ContentKind, ItemType, OriginalContentRecord};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Field changes for one catalog item. Only fields that are `Some` are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogUpdate {
    pub item_id: String,
    pub item_type: ItemType,
    pub description_html: Option<String>,
    pub seo_description: Option<String>,
}

impl CatalogUpdate {
    /// An update touching only the field tracked under `kind`.
    pub fn for_kind(item_id: &str, item_type: ItemType, kind: ContentKind, value: &str) -> Self {
        let (description_html, seo_description) = match kind {
            ContentKind::Description => (Some(value.to_string()), None),
            ContentKind::SeoDescription => (None, Some(value.to_string())),
        };
        Self {
            item_id: item_id.to_string(),
            item_type,
            description_html,
            seo_description,
        }
    }
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every item of `item_type`. A failed page truncates the list rather
    /// than erroring, so the result may be incomplete.
    async fn list_items(&self, item_type: ItemType) -> Vec<CatalogItem>;

    async fn get_item(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Option<CatalogItem>, CoreError>;

    /// Apply `update` and return the item as the catalog now reports it.
    async fn update_item(&self, update: &CatalogUpdate) -> Result<CatalogItem, CoreError>;
}

// ---------------------------------------------------------------------------
// AI generation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub keywords: String,
    pub page_type: ItemType,
    pub content_type: ContentKind,
    pub item_name: String,
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, CoreError>;
}

// ---------------------------------------------------------------------------
// Content-origin store
// ---------------------------------------------------------------------------

/// Baseline sent to the content store before AI content goes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineRecord {
    pub original_content: String,
    pub content_type: ContentKind,
    pub origin_type: ItemType,
    pub origin_id: String,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All known original-content records. Failures and timeouts yield an
    /// empty list.
    async fn list_records(&self) -> Vec<OriginalContentRecord>;

    async fn record_baseline(&self, baseline: &BaselineRecord) -> Result<(), CoreError>;
}
