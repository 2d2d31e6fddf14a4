//! End-to-end pagination behavior through the public library surface:
//! normalization, multi-page aggregation, the page iterator, and response
//! merging working together.

use serde_json::json;

use deepsource_mcp::pagination::{
    fetch_multiple_pages, merge_responses, normalize, page_stream, pagination_metadata,
    MultiPageOptions, PageInfo, PageIterator, PaginatedResponse,
};

fn page(items: &[i32], has_next: bool, end_cursor: Option<&str>) -> PaginatedResponse<i32> {
    PaginatedResponse {
        items: items.to_vec(),
        page_info: PageInfo {
            has_next_page: has_next,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: end_cursor.map(str::to_string),
        },
        total_count: 100,
    }
}

#[test]
fn test_normalize_then_metadata_round() {
    let params = normalize(&json!({"first": "25.9", "after": "abc"}));
    assert_eq!(params.first, Some(25));
    assert_eq!(params.after.as_deref(), Some("abc"));

    let response = page(&[1, 2, 3], true, Some("next"));
    let meta = pagination_metadata(&response, 1, false);
    assert!(meta.has_more_pages);
    assert_eq!(meta.next_cursor.as_deref(), Some("next"));
    assert_eq!(meta.total_count, Some(100));
}

#[test]
fn test_backward_request_overrides_forward() {
    let params = normalize(&json!({"first": 30, "before": "xyz", "last": 5}));
    assert_eq!(params.first, None);
    assert_eq!(params.last, Some(5));
    assert_eq!(params.before.as_deref(), Some("xyz"));
}

#[tokio::test]
async fn test_aggregator_walks_cursors_until_exhausted() {
    let pages = vec![
        page(&[1, 2], true, Some("c1")),
        page(&[3, 4], true, Some("c2")),
        page(&[5], false, None),
    ];
    let mut calls: Vec<Option<String>> = Vec::new();
    let mut iter = pages.into_iter();

    let result = fetch_multiple_pages(
        |cursor, _page_size| {
            calls.push(cursor.clone());
            let next = iter.next().expect("no page left");
            async move { Ok(next) }
        },
        MultiPageOptions {
            max_pages: 10,
            ..MultiPageOptions::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.items, vec![1, 2, 3, 4, 5]);
    assert_eq!(result.pages_fetched, 3);
    assert!(!result.has_more);
    assert_eq!(
        calls,
        vec![None, Some("c1".to_string()), Some("c2".to_string())]
    );
}

#[tokio::test]
async fn test_aggregator_stops_at_page_limit() {
    let result = fetch_multiple_pages(
        |cursor, _page_size| {
            let n = cursor.map_or(0, |c| c.parse::<i32>().unwrap() + 1);
            async move { Ok(page(&[n], true, Some(&n.to_string()))) }
        },
        MultiPageOptions {
            max_pages: 4,
            ..MultiPageOptions::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.pages_fetched, 4);
    assert!(result.has_more);
    assert_eq!(result.last_cursor.as_deref(), Some("3"));
}

#[tokio::test]
async fn test_iterator_and_stream_agree() {
    let make_fetch = || {
        let mut remaining = vec![
            page(&[1], true, Some("a")),
            page(&[2], false, None),
        ];
        remaining.reverse();
        move |_cursor: Option<String>, _size: u64| {
            let next = remaining.pop().expect("exhausted");
            async move { Ok(next) }
        }
    };

    let mut iter = PageIterator::new(make_fetch(), 10);
    let first = iter.next_page().await.unwrap().unwrap();
    assert_eq!(first, vec![1]);
    let second = iter.next_page().await.unwrap().unwrap();
    assert_eq!(second, vec![2]);
    assert!(iter.next_page().await.is_none());

    use futures::StreamExt;
    let collected: Vec<_> = page_stream(make_fetch(), 10).collect().await;
    assert_eq!(collected.len(), 2);
    assert_eq!(*collected[1].as_ref().unwrap(), vec![2]);
}

#[test]
fn test_merge_preserves_boundary_cursors() {
    let merged = merge_responses(vec![
        PaginatedResponse {
            items: vec![1, 2],
            page_info: PageInfo {
                has_next_page: true,
                has_previous_page: true,
                start_cursor: Some("first-start".to_string()),
                end_cursor: Some("first-end".to_string()),
            },
            total_count: 7,
        },
        page(&[3], true, Some("last-end")),
    ]);

    assert_eq!(merged.items, vec![1, 2, 3]);
    assert!(merged.page_info.has_previous_page);
    assert_eq!(merged.page_info.start_cursor.as_deref(), Some("first-start"));
    assert_eq!(merged.page_info.end_cursor.as_deref(), Some("last-end"));
    assert_eq!(merged.total_count, 100);
}
