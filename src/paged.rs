//! Cursor-based pagination against the YouTube list endpoints.

use crate::error::ApiError;

/// One page of results from a cursor-paginated list endpoint.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque cursor for the next page, absent on the last one.
    pub next_page_token: Option<String>,
}

/// Walks a paginated list endpoint, accumulating every item in page order.
///
/// `fetch_page` is called with `None` first and with the previous response's
/// cursor afterwards; it is never handed a cursor it did not produce. The
/// walk stops after `page_cap` calls, or earlier when a page comes back
/// empty or without a cursor. Errors from `fetch_page` propagate unmodified;
/// there is no retry.
pub async fn fetch_all_pages<T, F>(page_cap: usize, mut fetch_page: F) -> Result<Vec<T>, ApiError>
where
    F: AsyncFnMut(Option<String>) -> Result<Page<T>, ApiError>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    for _ in 0..page_cap {
        let page = fetch_page(token.take()).await?;
        if page.items.is_empty() {
            break;
        }
        items.extend(page.items);
        match page.next_page_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Serves `total_pages` pages of two items each, chained by the cursors
    // "p1", "p2", ...
    async fn serve(token: Option<String>, total_pages: usize) -> Result<Page<String>, ApiError> {
        let index = match token.as_deref() {
            None => 0,
            Some(t) => t.trim_start_matches('p').parse::<usize>().unwrap(),
        };
        let next = if index + 1 < total_pages {
            Some(format!("p{}", index + 1))
        } else {
            None
        };
        Ok(Page {
            items: vec![format!("item-{}-a", index), format!("item-{}-b", index)],
            next_page_token: next,
        })
    }

    fn failure() -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: "backend error".to_string(),
        }
    }

    #[tokio::test]
    async fn collects_all_pages_when_under_the_cap() {
        let items = fetch_all_pages(5, async |token| serve(token, 3).await)
            .await
            .unwrap();
        assert_eq!(
            items,
            vec![
                "item-0-a", "item-0-b", "item-1-a", "item-1-b", "item-2-a", "item-2-b"
            ]
        );
    }

    #[tokio::test]
    async fn stops_at_the_page_cap() {
        let mut calls = 0usize;
        let items = fetch_all_pages(2, async |token| {
            calls += 1;
            serve(token, 10).await
        })
        .await
        .unwrap();
        assert_eq!(items.len(), 4, "two pages of two items each");
        assert_eq!(calls, 2, "no call is made past the cap");
    }

    #[tokio::test]
    async fn single_page_without_cursor_terminates() {
        let mut calls = 0usize;
        let items = fetch_all_pages(5, async |token| {
            calls += 1;
            serve(token, 1).await
        })
        .await
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn empty_page_terminates_even_with_a_cursor() {
        let mut calls = 0usize;
        let items: Vec<String> = fetch_all_pages(5, async |_token| {
            calls += 1;
            Ok(Page {
                items: vec![],
                next_page_token: Some("p1".to_string()),
            })
        })
        .await
        .unwrap();
        assert!(items.is_empty());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn errors_propagate_unmodified() {
        let result: Result<Vec<String>, _> = fetch_all_pages(5, async |token| {
            if token.is_some() {
                return Err(failure());
            }
            Ok(Page {
                items: vec!["first".to_string()],
                next_page_token: Some("p1".to_string()),
            })
        })
        .await;
        match result {
            Err(ApiError::Status { status, .. }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn first_call_carries_no_cursor() {
        let mut seen: Vec<Option<String>> = Vec::new();
        let _ = fetch_all_pages(3, async |token| {
            seen.push(token.clone());
            serve(token, 2).await
        })
        .await
        .unwrap();
        assert_eq!(seen, vec![None, Some("p1".to_string())]);
    }
}
