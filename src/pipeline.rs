//! The orchestrator: videos -> comment threads -> (conditionally) replies,
//! flattened into export rows with a fail-fast-with-flush error policy.

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{DateWindow, YouTubeClient};
use crate::error::ApiError;
use crate::types::Row;

/// What the pipeline was doing when a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    VideoSearch,
    CommentThreads,
    Replies,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VideoSearch => write!(f, "video search"),
            Self::CommentThreads => write!(f, "comment thread fetch"),
            Self::Replies => write!(f, "reply fetch"),
        }
    }
}

/// The failing stage and its error, carried alongside the partial rows.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: ApiError,
}

/// Outcome of one pipeline run. A failure does not discard rows: everything
/// accumulated before the failing call is returned for export, and the abort
/// is an ordinary typed return rather than an unwind.
#[derive(Debug)]
pub struct PipelineRun {
    pub rows: Vec<Row>,
    pub failure: Option<StageFailure>,
}

impl PipelineRun {
    fn complete(rows: Vec<Row>) -> Self {
        Self {
            rows,
            failure: None,
        }
    }

    fn aborted(rows: Vec<Row>, stage: Stage, error: ApiError) -> Self {
        Self {
            rows,
            failure: Some(StageFailure { stage, error }),
        }
    }
}

/// What to search for. The window holds both bounds or neither; one-sided
/// input is resolved to "no filter" before it gets here.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub channel_id: String,
    pub keyword: String,
    pub window: DateWindow,
}

/// Runs the three nested fetch loops sequentially and flattens the results.
///
/// Comments with more than `reply_threshold` replies are exploded into one
/// row per fetched reply; everything else gets a single row with empty reply
/// columns. An above-threshold comment whose reply fetch comes back empty
/// falls back to the single-row shape so it still appears in the export.
pub async fn collect_rows(client: &YouTubeClient, request: &SearchRequest) -> PipelineRun {
    let config = client.config();
    let mut rows: Vec<Row> = Vec::new();

    let videos = match client
        .search_videos(&request.channel_id, &request.keyword, &request.window)
        .await
    {
        Ok(videos) => videos,
        Err(error) => return PipelineRun::aborted(rows, Stage::VideoSearch, error),
    };

    let video_bar = progress_bar(videos.len(), "videos", config.progress);
    for video in &videos {
        let threads = match client.list_comment_threads(&video.id).await {
            Ok(threads) => threads,
            Err(error) => return PipelineRun::aborted(rows, Stage::CommentThreads, error),
        };

        let comment_bar = progress_bar(threads.len(), "comments", config.progress);
        for thread in &threads {
            if thread.total_reply_count > config.reply_threshold {
                let replies = match client.list_replies(&thread.id).await {
                    Ok(replies) => replies,
                    Err(error) => return PipelineRun::aborted(rows, Stage::Replies, error),
                };
                if replies.is_empty() {
                    rows.push(Row::comment_only(video, thread));
                } else {
                    rows.extend(
                        replies
                            .iter()
                            .map(|reply| Row::with_reply(video, thread, reply)),
                    );
                }
            } else {
                rows.push(Row::comment_only(video, thread));
            }
            comment_bar.inc(1);
        }
        comment_bar.finish_and_clear();
        video_bar.inc(1);
    }
    video_bar.finish_and_clear();

    PipelineRun::complete(rows)
}

fn progress_bar(len: usize, label: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg:>8} {pos}/{len} [{bar:40.cyan/blue}] {percent:>3}%")
            .unwrap()
            .progress_chars("=> "),
    );
    bar.set_message(label.to_string());
    bar
}
