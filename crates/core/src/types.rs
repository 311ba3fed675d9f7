//! Catalog and content-origin domain types shared by every crate.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Item type
// ---------------------------------------------------------------------------

/// The two kinds of catalog record this application edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    #[serde(alias = "Product", alias = "PRODUCT")]
    Product,
    #[serde(alias = "Collection", alias = "COLLECTION")]
    Collection,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Collection => "collection",
        }
    }

    /// Parse a page/item type from a query string or command payload.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "product" | "products" => Ok(Self::Product),
            "collection" | "collections" => Ok(Self::Collection),
            other => Err(CoreError::Validation(format!(
                "Invalid item type '{other}'. Must be one of: product, collection"
            ))),
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Content kind
// ---------------------------------------------------------------------------

/// The two independently tracked catalog fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "description")]
    Description,
    #[serde(
        rename = "seo-description",
        alias = "seo_description",
        alias = "seoDescription"
    )]
    SeoDescription,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::SeoDescription => "seo-description",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "description" => Ok(Self::Description),
            "seo-description" | "seo_description" | "seoDescription" => Ok(Self::SeoDescription),
            other => Err(CoreError::Validation(format!(
                "Invalid content kind '{other}'. Must be one of: description, seo-description"
            ))),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Catalog item
// ---------------------------------------------------------------------------

/// A product or collection as read from the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    /// Plain-text description.
    pub description: String,
    pub description_html: String,
    pub seo_description: Option<String>,
    pub image_url: Option<String>,
    pub updated_at: Option<Timestamp>,
    pub item_type: ItemType,
}

impl CatalogItem {
    /// The live value of the field tracked under `kind`.
    ///
    /// Descriptions prefer the HTML form and fall back to the plain text.
    pub fn current_value(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Description if !self.description_html.trim().is_empty() => {
                &self.description_html
            }
            ContentKind::Description => &self.description,
            ContentKind::SeoDescription => self.seo_description.as_deref().unwrap_or(""),
        }
    }

    /// Return a copy with the field tracked under `kind` replaced.
    pub fn with_value(mut self, kind: ContentKind, value: &str) -> Self {
        match kind {
            ContentKind::Description => {
                self.description_html = value.to_string();
                self.description = crate::normalize::strip_tags(value).trim().to_string();
            }
            ContentKind::SeoDescription => {
                self.seo_description = Some(value.to_string());
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Original content record
// ---------------------------------------------------------------------------

/// Snapshot of a field's value before AI modification, owned by the
/// content-origin store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalContentRecord {
    pub origin_id: String,
    #[serde(alias = "contentType")]
    pub content_kind: ContentKind,
    #[serde(default)]
    pub original_content: Option<String>,
    #[serde(default)]
    pub original_content_html: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl OriginalContentRecord {
    /// The stored original, preferring the HTML form when it is non-empty.
    pub fn original_value(&self) -> &str {
        self.original_content_html
            .as_deref()
            .filter(|html| !html.trim().is_empty())
            .or(self.original_content.as_deref())
            .unwrap_or("")
    }
}
