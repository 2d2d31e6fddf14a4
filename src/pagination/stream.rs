//! Lazy, pull-based page iteration.
//!
//! For callers that want streaming rather than full aggregation: one fetch
//! suspension point per page, single-pass, forward-only, not restartable.
//! A fresh iterator must be constructed to re-scan from the start.

use futures::future::BoxFuture;
use futures::Stream;
use std::future::Future;

use crate::error::ClassifiedError;
use crate::pagination::response::PaginatedResponse;

type PageFetchFn<T> = Box<
    dyn FnMut(Option<String>, u64) -> BoxFuture<'static, Result<PaginatedResponse<T>, ClassifiedError>>
        + Send,
>;

/// Pull-based sequence of item batches, one batch per page.
///
/// Cursor state persists across `next_page` calls on the same instance. If
/// the underlying fetch fails, the error is surfaced on that call and the
/// iterator finishes permanently; callers should discard it rather than
/// poll again.
pub struct PageIterator<T> {
    fetch_page: PageFetchFn<T>,
    page_size: u64,
    cursor: Option<String>,
    finished: bool,
}

impl<T> PageIterator<T> {
    /// Creates an iterator over `fetch_page` with a fixed per-page bound.
    pub fn new<F, Fut>(mut fetch_page: F, page_size: u64) -> Self
    where
        F: FnMut(Option<String>, u64) -> Fut + Send + 'static,
        Fut: Future<Output = Result<PaginatedResponse<T>, ClassifiedError>> + Send + 'static,
    {
        Self {
            fetch_page: Box::new(move |cursor, size| Box::pin(fetch_page(cursor, size))),
            page_size,
            cursor: None,
            finished: false,
        }
    }

    /// Fetches the next page's items, or `None` on completion.
    pub async fn next_page(&mut self) -> Option<Result<Vec<T>, ClassifiedError>> {
        if self.finished {
            return None;
        }
        match (self.fetch_page)(self.cursor.clone(), self.page_size).await {
            Ok(response) => {
                let has_next = response.page_info.has_next_page;
                self.cursor = response.page_info.end_cursor.clone();
                // A missing end cursor means forward pagination cannot
                // continue, regardless of what has_next_page claims.
                self.finished = !has_next || self.cursor.is_none();
                Some(Ok(response.items))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<T> std::fmt::Debug for PageIterator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIterator")
            .field("page_size", &self.page_size)
            .field("cursor", &self.cursor)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Stream adapter over [`PageIterator`] for combinator-style consumers.
pub fn page_stream<T, F, Fut>(
    fetch_page: F,
    page_size: u64,
) -> impl Stream<Item = Result<Vec<T>, ClassifiedError>>
where
    T: 'static,
    F: FnMut(Option<String>, u64) -> Fut + Send + 'static,
    Fut: Future<Output = Result<PaginatedResponse<T>, ClassifiedError>> + Send + 'static,
{
    futures::stream::unfold(PageIterator::new(fetch_page, page_size), |mut iter| async {
        let batch = iter.next_page().await?;
        Some((batch, iter))
    })
}
