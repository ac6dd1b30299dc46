use thiserror::Error;

/// A remote call failed.
///
/// The pipeline makes no distinction between retryable and fatal causes:
/// transport errors, non-success statuses and malformed payloads all abort
/// the run the same way, preserving whatever was fetched before the failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to YouTube API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API returned status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}

/// Writing the export file failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}
