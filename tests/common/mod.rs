//! JSON body builders for mocking the three list endpoints.
#![allow(dead_code)]

use serde_json::{Value, json};

/// `search.list` page: `(video_id, title, published_at)` per item.
pub fn search_page(videos: &[(&str, &str, &str)], next: Option<&str>) -> String {
    let items: Vec<Value> = videos
        .iter()
        .map(|(id, title, published)| {
            json!({
                "id": {"videoId": id},
                "snippet": {"title": title, "publishedAt": published}
            })
        })
        .collect();
    page_body(items, next)
}

/// `commentThreads.list` page: `(id, text, like_count, total_reply_count)`
/// per item.
pub fn threads_page(threads: &[(&str, &str, u64, u64)], next: Option<&str>) -> String {
    let items: Vec<Value> = threads
        .iter()
        .map(|(id, text, likes, replies)| {
            json!({
                "id": id,
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "textDisplay": text,
                            "publishedAt": "2024-02-01T11:00:00Z",
                            "likeCount": likes
                        }
                    },
                    "totalReplyCount": replies
                }
            })
        })
        .collect();
    page_body(items, next)
}

/// `comments.list` page: `(text, like_count)` per item.
pub fn replies_page(replies: &[(&str, u64)], next: Option<&str>) -> String {
    let items: Vec<Value> = replies
        .iter()
        .map(|(text, likes)| {
            json!({
                "snippet": {
                    "textDisplay": text,
                    "publishedAt": "2024-02-01T12:00:00Z",
                    "likeCount": likes
                }
            })
        })
        .collect();
    page_body(items, next)
}

/// The API's error envelope.
pub fn error_body(message: &str) -> String {
    json!({"error": {"code": 403, "message": message}}).to_string()
}

fn page_body(items: Vec<Value>, next: Option<&str>) -> String {
    let mut value = json!({ "items": items });
    if let Some(token) = next {
        value["nextPageToken"] = json!(token);
    }
    value.to_string()
}
