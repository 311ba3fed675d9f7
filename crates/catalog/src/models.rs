//! Wire types for catalog GraphQL responses.

use copydesk_core::types::{CatalogItem, ItemType, Timestamp};
use serde::Deserialize;

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct Seo {
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Image {
    pub url: String,
}

/// A product or collection node. Products carry `featuredImage`,
/// collections carry `image`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    pub updated_at: Option<Timestamp>,
    pub seo: Option<Seo>,
    pub featured_image: Option<Image>,
    pub image: Option<Image>,
}

impl ItemNode {
    pub fn into_item(self, item_type: ItemType) -> CatalogItem {
        CatalogItem {
            id: self.id,
            title: self.title,
            description: self.description,
            description_html: self.description_html,
            seo_description: self.seo.and_then(|s| s.description),
            image_url: self.featured_image.or(self.image).map(|i| i.url),
            updated_at: self.updated_at,
            item_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub page_info: PageInfo,
    pub nodes: Vec<ItemNode>,
}

/// `data` of a products or collections page query.
#[derive(Debug, Deserialize)]
pub struct PageData {
    #[serde(alias = "products", alias = "collections")]
    pub connection: Connection,
}

/// `data` of a single product or collection query.
#[derive(Debug, Deserialize)]
pub struct NodeData {
    #[serde(alias = "product", alias = "collection")]
    pub node: Option<ItemNode>,
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// A field-level validation error reported by an update mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    #[serde(alias = "product", alias = "collection")]
    pub item: Option<ItemNode>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// `data` of a `productUpdate` or `collectionUpdate` mutation.
#[derive(Debug, Deserialize)]
pub struct UpdateData {
    #[serde(alias = "productUpdate", alias = "collectionUpdate")]
    pub payload: Option<UpdatePayload>,
}

/// Join user errors as `field: message`, separated by `, `.
pub fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| match e.field.as_deref() {
            Some(path) if !path.is_empty() => format!("{}: {}", path.join("."), e.message),
            _ => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
