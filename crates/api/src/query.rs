//! Shared query parameter types for API handlers.
//!
//! Values are kept as strings and parsed with the domain parsers so invalid
//! input surfaces as a `VALIDATION_ERROR` rather than a bare rejection.

use copydesk_core::error::CoreError;
use copydesk_core::types::{ContentKind, ItemType};
use serde::Deserialize;

/// `?type=product|collection` (plurals accepted).
#[derive(Debug, Deserialize)]
pub struct ItemTypeParams {
    #[serde(rename = "type")]
    pub item_type: String,
}

impl ItemTypeParams {
    pub fn item_type(&self) -> Result<ItemType, CoreError> {
        ItemType::parse(&self.item_type)
    }
}

/// `?item_type=&kind=` for the dashboard preview.
#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    pub item_type: String,
    pub kind: String,
}

impl PreviewParams {
    pub fn parse(&self) -> Result<(ItemType, ContentKind), CoreError> {
        Ok((
            ItemType::parse(&self.item_type)?,
            ContentKind::parse(&self.kind)?,
        ))
    }
}
