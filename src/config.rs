/// Tunables for the fetch pipeline.
///
/// Every cap is passed in explicitly rather than read from module-wide
/// constants so tests can shrink them without process-wide side effects.
/// The defaults bound quota spend at 150 videos per search, 1000 top-level
/// comments per video and 100 replies per comment.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// `maxResults` sent with every list call. The API caps this at 50.
    pub page_size: u32,
    /// Maximum `search.list` pages per run. Search is the most expensive
    /// call class (quota weight 100), so this is a hard safety limit
    /// against runaway channel-wide scans.
    pub video_page_cap: usize,
    /// Maximum `commentThreads.list` pages per video.
    pub comment_page_cap: usize,
    /// Maximum `comments.list` pages per parent comment.
    pub reply_page_cap: usize,
    /// Replies are fetched only for comments with more than this many
    /// replies. Applied by the orchestrator, not by the reply fetcher.
    pub reply_threshold: u64,
    /// Render progress bars on stderr while the pipeline runs.
    pub progress: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            video_page_cap: 3,
            comment_page_cap: 20,
            reply_page_cap: 2,
            reply_threshold: 5,
            progress: false,
        }
    }
}

impl FetchConfig {
    /// Upper bound on videos a single search can return.
    pub fn max_videos(&self) -> usize {
        self.video_page_cap * self.page_size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_caps() {
        let config = FetchConfig::default();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.video_page_cap, 3);
        assert_eq!(config.comment_page_cap, 20);
        assert_eq!(config.reply_page_cap, 2);
        assert_eq!(config.reply_threshold, 5);
        assert_eq!(config.max_videos(), 150);
    }
}
