//! Client for the AI content-generation service.
//!
//! Sends `POST /generate-content` and decodes the body once into
//! [`GeneratedContent`]. Rate-limit responses are recognised by status 429
//! or a marker in the body, on success and error responses alike.

use std::time::Duration;

use async_trait::async_trait;
use copydesk_core::error::CoreError;
use copydesk_core::normalize::GeneratedContent;
use copydesk_core::ports::{ContentGenerator, GenerationRequest};
use serde_json::Value;

use crate::error::{error_message, is_rate_limited, ContentServiceError};

/// Generation can take a while; allow well beyond a normal request.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the AI generation service.
pub struct AiContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl AiContentClient {
    /// * `base_url` - Service root, e.g. `https://ai.example.com`.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Request generated content for `request`.
    pub async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedContent, ContentServiceError> {
        let response = self
            .client
            .post(format!("{}/generate-content", self.base_url))
            .timeout(GENERATE_TIMEOUT)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let raw = response.text().await?;
        interpret_response(status, &raw)
    }
}

/// Map a status code and raw body to generated content or an error.
pub fn interpret_response(status: u16, raw: &str) -> Result<GeneratedContent, ContentServiceError> {
    let json = serde_json::from_str::<Value>(raw).ok();

    if is_rate_limited(status, json.as_ref()) {
        return Err(ContentServiceError::RateLimited);
    }
    if !(200..300).contains(&status) {
        return Err(ContentServiceError::Service {
            status,
            message: error_message(status, json.as_ref(), raw),
        });
    }

    Ok(GeneratedContent::from_body(raw))
}

#[async_trait]
impl ContentGenerator for AiContentClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, CoreError> {
        self.generate_content(request).await.map_err(|e| {
            tracing::warn!(item = %request.item_name, error = %e, "AI generation request failed");
            CoreError::from(e)
        })
    }
}
