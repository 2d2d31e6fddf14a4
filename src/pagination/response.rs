//! Paginated response values: the Relay connection shape, page merging, and
//! human-readable pagination metadata.

use serde::{Deserialize, Serialize};

/// Relay-style page flags and cursors.
///
/// Cursors are opaque tokens. A well-behaved upstream sets `end_cursor`
/// whenever `has_next_page` is true, but its absence is tolerated (treated
/// as "cannot continue forward pagination via cursor").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// One page of results. Constructed fresh per fetch and never mutated;
/// merging produces a new instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        }
    }
}

/// Combine multiple page responses into one.
///
/// Items concatenate in array order. `has_previous_page` and `start_cursor`
/// come from the first response, `has_next_page` and `end_cursor` from the
/// last. `total_count` takes the last response's value, falling back to the
/// merged item count when that value is zero.
pub fn merge_responses<T>(responses: Vec<PaginatedResponse<T>>) -> PaginatedResponse<T> {
    let (Some(first), Some(last)) = (responses.first(), responses.last()) else {
        return PaginatedResponse::default();
    };

    let page_info = PageInfo {
        has_next_page: last.page_info.has_next_page,
        has_previous_page: first.page_info.has_previous_page,
        start_cursor: first.page_info.start_cursor.clone(),
        end_cursor: last.page_info.end_cursor.clone(),
    };
    let reported_total = last.total_count;

    let items: Vec<T> = responses.into_iter().flat_map(|r| r.items).collect();
    let total_count = if reported_total > 0 {
        reported_total
    } else {
        items.len() as u64
    };

    PaginatedResponse {
        items,
        page_info,
        total_count,
    }
}

/// Human-readable pagination hints attached to tool responses.
///
/// Downstream consumers treat field presence as a signal, so optional
/// fields are omitted rather than serialized with null/false defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationMetadata {
    pub has_more_pages: bool,
    /// Items in this (possibly merged) page.
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_cursor: Option<String>,
    /// Present only when the upstream reported a positive total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Present only when more than one page was fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_fetched: Option<u32>,
    /// Present only when the page limit cut aggregation short.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_reached: Option<bool>,
}

/// Build pagination metadata for a response. Purely additive: the response
/// itself is left unchanged.
pub fn pagination_metadata<T>(
    response: &PaginatedResponse<T>,
    pages_fetched: u32,
    limit_reached: bool,
) -> PaginationMetadata {
    let info = &response.page_info;
    PaginationMetadata {
        has_more_pages: info.has_next_page,
        page_size: response.items.len(),
        next_cursor: if info.has_next_page {
            info.end_cursor.clone()
        } else {
            None
        },
        previous_cursor: if info.has_previous_page {
            info.start_cursor.clone()
        } else {
            None
        },
        total_count: (response.total_count > 0).then_some(response.total_count),
        pages_fetched: (pages_fetched > 1).then_some(pages_fetched),
        limit_reached: limit_reached.then_some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(
        items: &[&str],
        has_next: bool,
        has_prev: bool,
        start: Option<&str>,
        end: Option<&str>,
        total: u64,
    ) -> PaginatedResponse<String> {
        PaginatedResponse {
            items: items.iter().map(|s| s.to_string()).collect(),
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_prev,
                start_cursor: start.map(str::to_string),
                end_cursor: end.map(str::to_string),
            },
            total_count: total,
        }
    }

    #[test]
    fn test_merge_empty_input() {
        let merged: PaginatedResponse<String> = merge_responses(vec![]);
        assert!(merged.items.is_empty());
        assert!(!merged.page_info.has_next_page);
        assert!(!merged.page_info.has_previous_page);
        assert_eq!(merged.total_count, 0);
    }

    #[test]
    fn test_merge_singleton_is_structural_identity() {
        let single = page(&["a", "b"], true, false, Some("s"), Some("e"), 9);
        let merged = merge_responses(vec![single.clone()]);
        assert_eq!(merged, single);
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let merged = merge_responses(vec![
            page(&["a", "b"], true, false, Some("s1"), Some("e1"), 5),
            page(&["c"], true, true, Some("s2"), Some("e2"), 5),
            page(&["d", "e"], false, true, Some("s3"), Some("e3"), 5),
        ]);
        assert_eq!(merged.items, vec!["a", "b", "c", "d", "e"]);
        assert!(!merged.page_info.has_next_page);
        assert!(!merged.page_info.has_previous_page);
        assert_eq!(merged.page_info.start_cursor.as_deref(), Some("s1"));
        assert_eq!(merged.page_info.end_cursor.as_deref(), Some("e3"));
        assert_eq!(merged.total_count, 5);
    }

    #[test]
    fn test_merge_total_count_falls_back_to_item_count() {
        let merged = merge_responses(vec![
            page(&["a"], true, false, None, Some("e1"), 0),
            page(&["b", "c"], false, true, None, None, 0),
        ]);
        assert_eq!(merged.total_count, 3);
    }

    #[test]
    fn test_metadata_includes_cursors_only_when_meaningful() {
        let response = page(&["a", "b"], true, false, Some("s"), Some("e"), 7);
        let meta = pagination_metadata(&response, 1, false);
        assert!(meta.has_more_pages);
        assert_eq!(meta.page_size, 2);
        assert_eq!(meta.next_cursor.as_deref(), Some("e"));
        assert_eq!(meta.previous_cursor, None);
        assert_eq!(meta.total_count, Some(7));
        assert_eq!(meta.pages_fetched, None);
        assert_eq!(meta.limit_reached, None);
    }

    #[test]
    fn test_metadata_omits_optional_fields_in_json() {
        let response = page(&[], false, false, None, None, 0);
        let meta = pagination_metadata(&response, 1, false);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["has_more_pages"], false);
        assert_eq!(json["page_size"], 0);
        for absent in [
            "next_cursor",
            "previous_cursor",
            "total_count",
            "pages_fetched",
            "limit_reached",
        ] {
            assert!(json.get(absent).is_none(), "{absent} should be omitted");
        }
    }

    #[test]
    fn test_metadata_includes_pages_and_limit_flags() {
        let response = page(&["a"], true, true, Some("s"), Some("e"), 100);
        let meta = pagination_metadata(&response, 3, true);
        assert_eq!(meta.pages_fetched, Some(3));
        assert_eq!(meta.limit_reached, Some(true));
        assert_eq!(meta.previous_cursor.as_deref(), Some("s"));
    }

    #[test]
    fn test_page_info_deserializes_from_graphql_shape() {
        let info: PageInfo = serde_json::from_str(
            r#"{"hasNextPage": true, "hasPreviousPage": false, "endCursor": "abc"}"#,
        )
        .unwrap();
        assert!(info.has_next_page);
        assert_eq!(info.end_cursor.as_deref(), Some("abc"));
        assert_eq!(info.start_cursor, None);
    }
}
