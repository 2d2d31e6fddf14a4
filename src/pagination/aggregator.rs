//! Multi-page aggregation.
//!
//! Drives repeated single-page fetches through one fetch contract until
//! upstream exhaustion or a caller-supplied page limit, accumulating items
//! strictly in cursor order. A failure on any page aborts the whole
//! aggregation; no partial result is returned.

use std::future::Future;

use crate::error::ClassifiedError;
use crate::pagination::params::{NoopLog, PageLog};
use crate::pagination::response::PaginatedResponse;

/// Progress callback: `(pages_fetched, accumulated_item_count)`, fired
/// synchronously once per completed page, before the next fetch begins.
pub type OnPageProgress = Box<dyn FnMut(u32, usize) + Send>;

/// Options for [`fetch_multiple_pages`].
///
/// `max_pages` and `page_size` are fixed for the duration of a single call.
pub struct MultiPageOptions {
    /// Page cap when `fetch_all` is false. Expected `>= 1`.
    pub max_pages: u32,
    /// Per-page item bound passed to every fetch.
    pub page_size: u64,
    /// Ignore `max_pages` and fetch until exhaustion.
    pub fetch_all: bool,
    /// Optional per-page progress callback.
    pub on_progress: Option<OnPageProgress>,
}

impl Default for MultiPageOptions {
    fn default() -> Self {
        Self {
            max_pages: 10,
            page_size: 50,
            fetch_all: false,
            on_progress: None,
        }
    }
}

impl std::fmt::Debug for MultiPageOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiPageOptions")
            .field("max_pages", &self.max_pages)
            .field("page_size", &self.page_size)
            .field("fetch_all", &self.fetch_all)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "FnMut"))
            .finish()
    }
}

/// Result of a completed multi-page aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPageResult<T> {
    /// All accumulated items, in cursor order.
    pub items: Vec<T>,
    /// Number of pages actually fetched.
    pub pages_fetched: u32,
    /// Whether the upstream reported more pages when the loop stopped.
    pub has_more: bool,
    /// Cursor to continue from, when the upstream provided one.
    pub last_cursor: Option<String>,
    /// The upstream's reported grand total, from the last fetched page.
    pub total_count: Option<u64>,
}

/// Fetch pages sequentially until exhaustion or the page limit.
///
/// `fetch_page` is called with `(cursor, page_size)`; a `None` cursor means
/// the first page. Errors from `fetch_page` propagate as-is, discarding the
/// partial accumulation — callers must treat this as a hard failure, not a
/// degraded result.
pub async fn fetch_multiple_pages<T, F, Fut>(
    fetch_page: F,
    options: MultiPageOptions,
) -> Result<MultiPageResult<T>, ClassifiedError>
where
    F: FnMut(Option<String>, u64) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, ClassifiedError>>,
{
    fetch_multiple_pages_with(fetch_page, options, &NoopLog).await
}

/// [`fetch_multiple_pages`] with an injected warning sink.
pub async fn fetch_multiple_pages_with<T, F, Fut>(
    mut fetch_page: F,
    mut options: MultiPageOptions,
    log: &dyn PageLog,
) -> Result<MultiPageResult<T>, ClassifiedError>
where
    F: FnMut(Option<String>, u64) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, ClassifiedError>>,
{
    let max_pages = options.max_pages;
    let page_size = options.page_size;

    let mut items: Vec<T> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched: u32 = 0;
    let mut has_more = true;
    let mut total_count: Option<u64> = None;

    while has_more && (options.fetch_all || pages_fetched < max_pages) {
        let response = fetch_page(cursor.clone(), page_size).await?;

        items.extend(response.items);
        pages_fetched += 1;
        has_more = response.page_info.has_next_page;
        cursor = response.page_info.end_cursor.clone();
        total_count = Some(response.total_count);

        if let Some(on_progress) = options.on_progress.as_mut() {
            on_progress(pages_fetched, items.len());
        }

        if has_more && cursor.is_none() {
            // Upstream claims another page but gave no cursor to continue
            // from. Stop here rather than refetch the same page forever.
            log.warn("upstream reported more pages without an end cursor; stopping aggregation");
            break;
        }
    }

    Ok(MultiPageResult {
        items,
        pages_fetched,
        has_more,
        last_cursor: cursor,
        total_count,
    })
}
