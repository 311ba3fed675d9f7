//! GraphQL client for the commerce catalog API.
//!
//! Wraps catalog queries (paginated listings, single-item lookups) and the
//! product/collection update mutations using [`reqwest`].

use async_trait::async_trait;
use copydesk_core::error::CoreError;
use copydesk_core::pagination::{self, Page, PageSource};
use copydesk_core::ports::{CatalogService, CatalogUpdate};
use copydesk_core::types::{CatalogItem, ItemType};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::models::{
    format_user_errors, GraphQlResponse, NodeData, PageData, UpdateData, UserError,
};
use crate::queries;

/// Header carrying the catalog access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Errors from the catalog GraphQL layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog API returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// Top-level GraphQL errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The mutation reported field-level validation errors.
    #[error("{}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// The response carried no data.
    #[error("No data returned from the catalog")]
    EmptyResponse,
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Request(e) => CoreError::Unavailable(e.to_string()),
            CatalogError::ApiError { status, body } => {
                CoreError::Upstream(format!("Catalog API returned HTTP {status}: {body}"))
            }
            CatalogError::GraphQl(msg) => CoreError::Upstream(msg),
            CatalogError::UserErrors(errors) => CoreError::Upstream(format_user_errors(&errors)),
            CatalogError::EmptyResponse => {
                CoreError::Upstream("Failed to update: no data returned from the catalog".into())
            }
        }
    }
}

/// HTTP client for the catalog GraphQL endpoint.
pub struct CatalogClient {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    page_size: u32,
}

impl CatalogClient {
    /// Create a new client.
    ///
    /// * `api_url` - Full GraphQL endpoint URL.
    /// * `page_size` - Nodes requested per page when listing items.
    pub fn new(api_url: String, access_token: String, page_size: u32) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, access_token, page_size)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: String,
        access_token: String,
        page_size: u32,
    ) -> Self {
        Self {
            client,
            api_url,
            access_token,
            page_size: pagination::clamp_page_size(page_size),
        }
    }

    /// Fetch one page of products or collections.
    pub async fn fetch_page(
        &self,
        item_type: ItemType,
        first: u32,
        after: Option<String>,
    ) -> Result<Page<CatalogItem>, CatalogError> {
        let query = match item_type {
            ItemType::Product => queries::products_page(),
            ItemType::Collection => queries::collections_page(),
        };
        let data: PageData = self
            .execute(&query, json!({ "first": first, "after": after }))
            .await?;

        let connection = data.connection;
        Ok(Page {
            nodes: connection
                .nodes
                .into_iter()
                .map(|node| node.into_item(item_type))
                .collect(),
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        })
    }

    /// Look up a single item by id.
    pub async fn fetch_item(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Option<CatalogItem>, CatalogError> {
        let query = match item_type {
            ItemType::Product => queries::product_by_id(),
            ItemType::Collection => queries::collection_by_id(),
        };
        let data: NodeData = self.execute(&query, json!({ "id": item_id })).await?;
        Ok(data.node.map(|node| node.into_item(item_type)))
    }

    /// Run the update mutation for `update`.
    pub async fn update(&self, update: &CatalogUpdate) -> Result<CatalogItem, CatalogError> {
        let mutation = match update.item_type {
            ItemType::Product => queries::product_update(),
            ItemType::Collection => queries::collection_update(),
        };
        let data: UpdateData = self
            .execute(&mutation, json!({ "input": update_input(update) }))
            .await?;

        let payload = data.payload.ok_or(CatalogError::EmptyResponse)?;
        if !payload.user_errors.is_empty() {
            return Err(CatalogError::UserErrors(payload.user_errors));
        }
        payload
            .item
            .map(|node| node.into_item(update.item_type))
            .ok_or(CatalogError::EmptyResponse)
    }

    // ---- private helpers ----

    /// POST a GraphQL document and decode its `data`.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .post(&self.api_url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            let joined = body
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CatalogError::GraphQl(joined));
        }
        body.data.ok_or(CatalogError::EmptyResponse)
    }
}

/// Build the mutation `input` object, including only the fields present.
pub fn update_input(update: &CatalogUpdate) -> Value {
    let mut input = Map::new();
    input.insert("id".into(), Value::String(update.item_id.clone()));
    if let Some(html) = &update.description_html {
        input.insert("descriptionHtml".into(), Value::String(html.clone()));
    }
    if let Some(seo) = &update.seo_description {
        input.insert("seo".into(), json!({ "description": seo }));
    }
    Value::Object(input)
}

// ---------------------------------------------------------------------------
// Pagination + service port
// ---------------------------------------------------------------------------

/// Page source over one item type.
pub struct ItemPages<'a> {
    client: &'a CatalogClient,
    item_type: ItemType,
}

#[async_trait]
impl<'a> PageSource for ItemPages<'a> {
    type Item = CatalogItem;
    type Error = CatalogError;

    async fn fetch_page(
        &self,
        first: u32,
        after: Option<String>,
    ) -> Result<Page<CatalogItem>, CatalogError> {
        self.client.fetch_page(self.item_type, first, after).await
    }
}

#[async_trait]
impl CatalogService for CatalogClient {
    async fn list_items(&self, item_type: ItemType) -> Vec<CatalogItem> {
        let source = ItemPages {
            client: self,
            item_type,
        };
        let items = pagination::fetch_all(&source, self.page_size).await;
        tracing::debug!(item_type = %item_type, count = items.len(), "Fetched catalog items");
        items
    }

    async fn get_item(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Option<CatalogItem>, CoreError> {
        Ok(self.fetch_item(item_id, item_type).await?)
    }

    async fn update_item(&self, update: &CatalogUpdate) -> Result<CatalogItem, CoreError> {
        self.update(update).await.map_err(|e| {
            tracing::warn!(item_id = %update.item_id, error = %e, "Catalog update failed");
            CoreError::from(e)
        })
    }
}
