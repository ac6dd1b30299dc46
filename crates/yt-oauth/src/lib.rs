//! OAuth 2.0 credential store for the YouTube Data API.
//!
//! Two pieces: a persisted token file with transparent refresh
//! ([`Authenticator`]), used by the fetcher before every run, and a one-shot
//! PKCE authorization-code flow ([`run_auth_flow`], wrapped by the
//! `yt-oauth-helper` binary) that creates the token file in the first place.

mod flow;
mod token;

pub use flow::{OAUTH_CALLBACK_PORT, run_auth_flow};
pub use token::{Authenticator, StoredToken};

use thiserror::Error;

/// OAuth scope required for reading comments over SSL.
pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to read token file '{path}': {source}")]
    ReadToken {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write token file '{path}': {source}")]
    WriteToken {
        path: String,
        source: std::io::Error,
    },

    #[error("token file '{path}' is not valid JSON: {source}")]
    ParseToken {
        path: String,
        source: serde_json::Error,
    },

    #[error("token endpoint request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint returned status {status}: {body}")]
    TokenEndpoint {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("token response missing field '{0}'")]
    MissingField(&'static str),

    #[error("authorization timed out after {0} seconds")]
    Timeout(u64),

    #[error("authorization callback reported an error: {0}")]
    Callback(String),

    #[error("failed to bind the callback listener: {0}")]
    Listener(std::io::Error),
}
