//! Dashboard reconciliation of catalog items against original-content records.
//!
//! A catalog item appears on the dashboard only when the content store holds
//! an original for at least one of its fields. For each tracked field the
//! row records whether AI content exists and whether the live value has been
//! reverted to the stored original.

use std::collections::HashMap;

use serde::Serialize;

use crate::normalize::strip_tags;
use crate::types::{CatalogItem, ContentKind, ItemType, OriginalContentRecord};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One dashboard row: a catalog item joined with its original-content records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    pub item: CatalogItem,
    pub original_description: Option<OriginalContentRecord>,
    pub original_seo: Option<OriginalContentRecord>,
    pub has_ai_description: bool,
    pub has_ai_seo: bool,
    pub is_description_reverted: bool,
    pub is_seo_reverted: bool,
}

impl DashboardRow {
    pub fn has_ai(&self, kind: ContentKind) -> bool {
        match kind {
            ContentKind::Description => self.has_ai_description,
            ContentKind::SeoDescription => self.has_ai_seo,
        }
    }

    pub fn is_reverted(&self, kind: ContentKind) -> bool {
        match kind {
            ContentKind::Description => self.is_description_reverted,
            ContentKind::SeoDescription => self.is_seo_reverted,
        }
    }

    pub fn original(&self, kind: ContentKind) -> Option<&OriginalContentRecord> {
        match kind {
            ContentKind::Description => self.original_description.as_ref(),
            ContentKind::SeoDescription => self.original_seo.as_ref(),
        }
    }

    /// Whether any field with AI content still differs from its original.
    pub fn is_modified(&self) -> bool {
        (self.has_ai_description && !self.is_description_reverted)
            || (self.has_ai_seo && !self.is_seo_reverted)
    }

    /// Return a copy marked as reverted for `kind`, with the live field set
    /// to `original`.
    pub fn mark_reverted(&self, kind: ContentKind, original: &str) -> Self {
        let mut row = self.clone();
        row.item = row.item.with_value(kind, original);
        match kind {
            ContentKind::Description => row.is_description_reverted = true,
            ContentKind::SeoDescription => row.is_seo_reverted = true,
        }
        row
    }
}

/// Aggregate counts shown above the dashboard table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    pub collection_count: usize,
    pub modified_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub rows: Vec<DashboardRow>,
    pub summary: DashboardSummary,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Normalize a field value for "reverted" comparison: strip tags, trim,
/// lower-case.
pub fn comparable(text: &str) -> String {
    strip_tags(text).trim().to_lowercase()
}

/// Whether the live value matches the stored original under [`comparable`].
pub fn is_reverted(current: &str, original: &str) -> bool {
    comparable(current) == comparable(original)
}

// ---------------------------------------------------------------------------
// Record index
// ---------------------------------------------------------------------------

type RecordKey = (String, ContentKind);

/// Index records by `(origin_id, kind)`.
///
/// When the store returns several records for one key, the one with the
/// newest `created_at` is kept. Undated records lose to dated ones; among
/// equals the first in store order is kept.
pub fn index_records(
    records: Vec<OriginalContentRecord>,
) -> HashMap<RecordKey, OriginalContentRecord> {
    let mut index: HashMap<RecordKey, OriginalContentRecord> = HashMap::new();

    for record in records {
        let key = (record.origin_id.clone(), record.content_kind);
        match index.get(&key) {
            Some(existing) => {
                tracing::debug!(
                    origin_id = %key.0,
                    kind = %key.1,
                    "Duplicate original content record"
                );
                if supersedes(&record, existing) {
                    index.insert(key, record);
                }
            }
            None => {
                index.insert(key, record);
            }
        }
    }

    index
}

fn supersedes(candidate: &OriginalContentRecord, existing: &OriginalContentRecord) -> bool {
    match (candidate.created_at, existing.created_at) {
        (Some(new), Some(old)) => new > old,
        (Some(_), None) => true,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Row construction
// ---------------------------------------------------------------------------

/// Join one item with its records. Returns `None` when neither kind has a
/// record.
pub fn build_row(
    item: CatalogItem,
    original_description: Option<OriginalContentRecord>,
    original_seo: Option<OriginalContentRecord>,
) -> Option<DashboardRow> {
    if original_description.is_none() && original_seo.is_none() {
        return None;
    }

    let reverted = |record: &Option<OriginalContentRecord>, kind: ContentKind| {
        record
            .as_ref()
            .is_some_and(|r| is_reverted(item.current_value(kind), r.original_value()))
    };
    let is_description_reverted = reverted(&original_description, ContentKind::Description);
    let is_seo_reverted = reverted(&original_seo, ContentKind::SeoDescription);

    Some(DashboardRow {
        has_ai_description: original_description.is_some(),
        has_ai_seo: original_seo.is_some(),
        is_description_reverted,
        is_seo_reverted,
        original_description,
        original_seo,
        item,
    })
}

/// Reconcile every catalog item against the store's records.
pub fn build_rows(
    items: Vec<CatalogItem>,
    records: Vec<OriginalContentRecord>,
) -> Vec<DashboardRow> {
    let mut index = index_records(records);

    items
        .into_iter()
        .filter_map(|item| {
            let description = index.remove(&(item.id.clone(), ContentKind::Description));
            let seo = index.remove(&(item.id.clone(), ContentKind::SeoDescription));
            build_row(item, description, seo)
        })
        .collect()
}

pub fn summarize(rows: &[DashboardRow]) -> DashboardSummary {
    rows.iter().fold(DashboardSummary::default(), |mut acc, row| {
        match row.item.item_type {
            ItemType::Product => acc.product_count += 1,
            ItemType::Collection => acc.collection_count += 1,
        }
        if row.is_modified() {
            acc.modified_count += 1;
        }
        acc
    })
}

pub fn build_dashboard(
    items: Vec<CatalogItem>,
    records: Vec<OriginalContentRecord>,
) -> Dashboard {
    let rows = build_rows(items, records);
    let summary = summarize(&rows);
    Dashboard { rows, summary }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
