//! Authenticated client for the three YouTube Data API list endpoints the
//! pipeline walks: `search.list`, `commentThreads.list` and `comments.list`.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::FetchConfig;
use crate::error::ApiError;
use crate::paged::{Page, fetch_all_pages};
use crate::types::{
    CommentListResponse, CommentThread, CommentThreadListResponse, Reply, SearchListResponse,
    Video,
};

/// Production API base. Tests point the client at a local mock server.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Publication window for a video search. Both bounds are RFC3339 UTC
/// instants, already normalized by the invocation surface; the client sends
/// whichever bounds are present verbatim.
#[derive(Debug, Clone, Default)]
pub struct DateWindow {
    pub published_after: Option<String>,
    pub published_before: Option<String>,
}

/// One long-lived handle reused for every call in a run. Holds the bearer
/// token obtained before the pipeline started; nothing here re-authenticates.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    access_token: String,
    config: FetchConfig,
}

impl YouTubeClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        config: FetchConfig,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
            config,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Videos on `channel_id` matching `keyword`, in the endpoint's
    /// relevance order, capped at `video_page_cap` pages.
    pub async fn search_videos(
        &self,
        channel_id: &str,
        keyword: &str,
        window: &DateWindow,
    ) -> Result<Vec<Video>, ApiError> {
        let page_size = self.config.page_size.to_string();
        fetch_all_pages(self.config.video_page_cap, async |page_token| {
            let mut query = vec![
                ("part", "id,snippet"),
                ("type", "video"),
                ("channelId", channel_id),
                ("q", keyword),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(after) = window.published_after.as_deref() {
                query.push(("publishedAfter", after));
            }
            if let Some(before) = window.published_before.as_deref() {
                query.push(("publishedBefore", before));
            }
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }
            let response: SearchListResponse = self.get_json("search", &query).await?;
            Ok(Page {
                items: response.items.into_iter().map(Video::from).collect(),
                next_page_token: response.next_page_token,
            })
        })
        .await
    }

    /// Top-level comment threads for one video in the endpoint's relevance
    /// order, capped at `comment_page_cap` pages. The snippet carries
    /// `totalReplyCount`, which drives the orchestrator's reply decision.
    pub async fn list_comment_threads(&self, video_id: &str) -> Result<Vec<CommentThread>, ApiError> {
        let page_size = self.config.page_size.to_string();
        fetch_all_pages(self.config.comment_page_cap, async |page_token| {
            let mut query = vec![
                ("part", "snippet,replies"),
                ("videoId", video_id),
                ("order", "relevance"),
                ("textFormat", "plainText"),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }
            let response: CommentThreadListResponse =
                self.get_json("commentThreads", &query).await?;
            Ok(Page {
                items: response.items.into_iter().map(CommentThread::from).collect(),
                next_page_token: response.next_page_token,
            })
        })
        .await
    }

    /// Replies to one top-level comment, capped at `reply_page_cap` pages.
    pub async fn list_replies(&self, parent_id: &str) -> Result<Vec<Reply>, ApiError> {
        let page_size = self.config.page_size.to_string();
        fetch_all_pages(self.config.reply_page_cap, async |page_token| {
            let mut query = vec![
                ("part", "snippet"),
                ("parentId", parent_id),
                ("textFormat", "plainText"),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }
            let response: CommentListResponse = self.get_json("comments", &query).await?;
            Ok(Page {
                items: response.items.into_iter().map(Reply::from).collect(),
                next_page_token: response.next_page_token,
            })
        })
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                message: api_error_message(&body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pulls the human-readable message out of the API's error envelope,
/// falling back to the raw body when it is not the expected JSON shape.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_extracted_from_api_envelope() {
        let body = r#"{"error": {"code": 403, "message": "quota exceeded"}}"#;
        assert_eq!(api_error_message(body), "quota exceeded");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("  plain text failure\n"), "plain text failure");
    }
}
