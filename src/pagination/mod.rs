//! Cursor-based pagination: parameter normalization, multi-page
//! aggregation, lazy page iteration, and response merging.
//!
//! Assumes Relay-style pagination (forward: `first`/`after`, backward:
//! `last`/`before`) with a legacy `offset` fallback. Every data-fetching
//! operation in the server goes through this module.

pub mod aggregator;
pub mod params;
pub mod response;
pub mod stream;

pub use aggregator::{
    fetch_multiple_pages, fetch_multiple_pages_with, MultiPageOptions, MultiPageResult,
    OnPageProgress,
};
pub use params::{normalize, normalize_with, NoopLog, PageLog, PaginationParams, TracingLog};
pub use response::{merge_responses, pagination_metadata, PageInfo, PaginatedResponse, PaginationMetadata};
pub use stream::{page_stream, PageIterator};
