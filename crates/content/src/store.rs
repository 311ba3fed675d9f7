//! Client for the content-origin store.
//!
//! Reads every [`OriginalContentRecord`] (`GET /contents`) and records a new
//! baseline at publish time (`POST /content`). Reads are bounded by a fixed
//! timeout and degrade to an empty list; they are never retried.

use std::time::Duration;

use async_trait::async_trait;
use copydesk_core::error::CoreError;
use copydesk_core::ports::{BaselineRecord, ContentStore};
use copydesk_core::types::OriginalContentRecord;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{error_message, ContentServiceError};

/// The store answers with either a bare array or a `{ "data": [...] }`
/// envelope. Records are decoded one by one so a malformed record does not
/// hide the rest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordsEnvelope {
    Bare(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl RecordsEnvelope {
    /// Decode each record, skipping the ones that do not parse.
    pub fn into_records(self) -> Vec<OriginalContentRecord> {
        let (Self::Bare(raw) | Self::Wrapped { data: raw }) = self;
        raw.into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                serde_json::from_value::<OriginalContentRecord>(value)
                    .map_err(|e| {
                        tracing::warn!(index, error = %e, "Skipping malformed content record");
                    })
                    .ok()
            })
            .collect()
    }
}

/// HTTP client for the content-origin store.
pub struct ContentStoreClient {
    client: reqwest::Client,
    base_url: String,
    read_timeout: Duration,
}

impl ContentStoreClient {
    pub fn new(base_url: String, read_timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, read_timeout)
    }

    pub fn with_client(client: reqwest::Client, base_url: String, read_timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            read_timeout,
        }
    }

    /// Fetch all records, propagating any failure.
    pub async fn fetch_records(&self) -> Result<Vec<OriginalContentRecord>, ContentServiceError> {
        let response = self
            .client
            .get(format!("{}/contents", self.base_url))
            .timeout(self.read_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let json = serde_json::from_str::<Value>(&raw).ok();
            return Err(ContentServiceError::Service {
                status: status.as_u16(),
                message: error_message(status.as_u16(), json.as_ref(), &raw),
            });
        }

        let envelope: RecordsEnvelope = response.json().await?;
        Ok(envelope.into_records())
    }

    /// Record the pre-publish baseline for an item field.
    pub async fn post_baseline(&self, baseline: &BaselineRecord) -> Result<(), ContentServiceError> {
        let response = self
            .client
            .post(format!("{}/content", self.base_url))
            .json(baseline)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let json = serde_json::from_str::<Value>(&raw).ok();
            return Err(ContentServiceError::Service {
                status: status.as_u16(),
                message: error_message(status.as_u16(), json.as_ref(), &raw),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for ContentStoreClient {
    async fn list_records(&self) -> Vec<OriginalContentRecord> {
        match self.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Content store read failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn record_baseline(&self, baseline: &BaselineRecord) -> Result<(), CoreError> {
        self.post_baseline(baseline).await.map_err(|e| {
            tracing::warn!(origin_id = %baseline.origin_id, error = %e, "Baseline record failed");
            CoreError::from(e)
        })
    }
}
