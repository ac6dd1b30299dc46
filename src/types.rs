//! Wire-level response types for the three list endpoints and the flattened
//! domain types the pipeline works with.
//!
//! Only the fields this tool actually consumes are modelled; everything else
//! in the API payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};

// --- search.list ---

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

// --- commentThreads.list ---

#[derive(Debug, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<CommentThreadResource>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThreadResource {
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: CommentResource,
    #[serde(rename = "totalReplyCount")]
    pub total_reply_count: u64,
}

// --- comments.list ---

#[derive(Debug, Deserialize)]
pub struct CommentListResponse {
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<CommentResource>,
}

#[derive(Debug, Deserialize)]
pub struct CommentResource {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "textDisplay")]
    pub text_display: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(rename = "likeCount")]
    pub like_count: u64,
}

// --- domain types ---

/// A video located by the channel search. Dates stay in the RFC3339 form the
/// API returns them in; nothing downstream needs to interpret them.
#[derive(Debug, Clone)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub published_at: String,
}

impl From<SearchResult> for Video {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.id.video_id,
            title: result.snippet.title,
            published_at: result.snippet.published_at,
        }
    }
}

/// One top-level comment on a video, with the reply count that drives the
/// reply-fetch decision.
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub id: String,
    pub text: String,
    pub published_at: String,
    pub like_count: u64,
    pub total_reply_count: u64,
}

impl From<CommentThreadResource> for CommentThread {
    fn from(resource: CommentThreadResource) -> Self {
        let comment = resource.snippet.top_level_comment.snippet;
        Self {
            id: resource.id,
            text: comment.text_display,
            published_at: comment.published_at,
            like_count: comment.like_count,
            total_reply_count: resource.snippet.total_reply_count,
        }
    }
}

/// A reply to a top-level comment.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub published_at: String,
    pub like_count: u64,
}

impl From<CommentResource> for Reply {
    fn from(resource: CommentResource) -> Self {
        Self {
            text: resource.snippet.text_display,
            published_at: resource.snippet.published_at,
            like_count: resource.snippet.like_count,
        }
    }
}

/// One denormalized export record. Field order is the column order of the
/// CSV file; the reply columns are `None` for comments that stayed below the
/// reply-fetch threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub video_id: String,
    pub video_date: String,
    pub title: String,
    pub comment_text: String,
    pub comment_id: String,
    pub comment_date: String,
    pub comment_likes: u64,
    pub comment_replies: u64,
    pub reply_text: Option<String>,
    pub reply_date: Option<String>,
    pub reply_likes: Option<u64>,
}

impl Row {
    /// Row for a comment exported without replies.
    pub fn comment_only(video: &Video, thread: &CommentThread) -> Self {
        Self {
            video_id: video.id.clone(),
            video_date: video.published_at.clone(),
            title: video.title.clone(),
            comment_text: thread.text.clone(),
            comment_id: thread.id.clone(),
            comment_date: thread.published_at.clone(),
            comment_likes: thread.like_count,
            comment_replies: thread.total_reply_count,
            reply_text: None,
            reply_date: None,
            reply_likes: None,
        }
    }

    /// Row carrying one reply of an above-threshold comment.
    pub fn with_reply(video: &Video, thread: &CommentThread, reply: &Reply) -> Self {
        Self {
            reply_text: Some(reply.text.clone()),
            reply_date: Some(reply.published_at.clone()),
            reply_likes: Some(reply.like_count),
            ..Self::comment_only(video, thread)
        }
    }
}
