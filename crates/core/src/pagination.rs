//! Cursor-paginated collection retrieval.
//!
//! [`fetch_all`] walks a [`PageSource`] one page at a time, feeding the last
//! returned cursor into the next request. A failing page ends the walk and
//! the nodes gathered so far are returned, so callers must treat a short
//! list as possibly incomplete.

use async_trait::async_trait;

/// Default number of nodes requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page the catalog API accepts.
pub const MAX_PAGE_SIZE: u32 = 250;

/// One page of results from a cursor-paginated query.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub nodes: Vec<T>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A remote collection that can be read a page at a time.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;
    type Error: std::fmt::Display + Send;

    /// Fetch up to `first` nodes starting after `after`.
    async fn fetch_page(
        &self,
        first: u32,
        after: Option<String>,
    ) -> Result<Page<Self::Item>, Self::Error>;
}

/// Clamp a requested page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Fetch every node from `source`, sequentially, in server order.
pub async fn fetch_all<S>(source: &S, page_size: u32) -> Vec<S::Item>
where
    S: PageSource + ?Sized,
{
    let first = clamp_page_size(page_size);
    let mut nodes = Vec::new();
    let mut after: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = match source.fetch_page(first, after.take()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    pages_fetched = pages,
                    nodes_fetched = nodes.len(),
                    error = %e,
                    "Page request failed, returning partial results"
                );
                break;
            }
        };
        pages += 1;
        nodes.extend(page.nodes);

        match (page.has_next_page, page.end_cursor) {
            (true, Some(cursor)) => after = Some(cursor),
            (true, None) => {
                tracing::warn!(
                    pages_fetched = pages,
                    "Server reported more pages without a cursor, stopping"
                );
                break;
            }
            (false, _) => break,
        }
    }

    nodes
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
