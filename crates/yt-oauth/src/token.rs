use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Google's token endpoint, shared by the refresh path and the initial
/// code exchange.
pub(crate) const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// A token is treated as stale this many seconds before its recorded expiry
/// so in-flight requests never race the real deadline.
const EXPIRY_MARGIN_SECS: u64 = 60;

/// The persisted credential file. Carries the client identity alongside the
/// tokens so a refresh needs nothing but this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// OAuth client the token was issued to.
    pub client_id: String,
    pub client_secret: String,
    /// Bearer token sent with API requests.
    pub access_token: String,
    /// Long-lived token used to mint new access tokens.
    pub refresh_token: String,
    /// Usually "Bearer".
    pub token_type: String,
    /// Unix timestamp after which `access_token` is stale.
    pub expires_at: u64,
}

impl StoredToken {
    /// Whether the access token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        unix_now() + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    pub fn load(path: &str) -> Result<Self, AuthError> {
        let contents = std::fs::read_to_string(path).map_err(|source| AuthError::ReadToken {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| AuthError::ParseToken {
            path: path.to_string(),
            source,
        })
    }

    /// Saves the token as pretty JSON, owner-readable only on Unix.
    pub fn save(&self, path: &str) -> Result<(), AuthError> {
        let contents = serde_json::to_string_pretty(self).map_err(|source| {
            AuthError::ParseToken {
                path: path.to_string(),
                source,
            }
        })?;
        let write = |path: &str| -> std::io::Result<()> {
            std::fs::write(path, &contents)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
            }
            Ok(())
        };
        write(path).map_err(|source| AuthError::WriteToken {
            path: path.to_string(),
            source,
        })
    }
}

/// Long-lived authenticated session handle: owns the token file and rotates
/// its access token when it goes stale. Refreshing happens at most once per
/// run, before the fetch pipeline starts.
pub struct Authenticator {
    http: reqwest::Client,
    path: String,
    token: StoredToken,
}

impl Authenticator {
    pub fn from_file(path: &str) -> Result<Self, AuthError> {
        Ok(Self {
            http: reqwest::Client::new(),
            path: path.to_string(),
            token: StoredToken::load(path)?,
        })
    }

    pub fn token(&self) -> &StoredToken {
        &self.token
    }

    /// A valid bearer token, refreshed and persisted first when stale.
    pub async fn access_token(&mut self) -> Result<String, AuthError> {
        if self.token.is_expired() {
            eprintln!("Access token expired, refreshing...");
            self.refresh().await?;
            self.token.save(&self.path)?;
            eprintln!("OAuth token refreshed");
        }
        Ok(self.token.access_token.clone())
    }

    async fn refresh(&mut self) -> Result<(), AuthError> {
        let params = [
            ("client_id", self.token.client_id.as_str()),
            ("client_secret", self.token.client_secret.as_str()),
            ("refresh_token", self.token.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenEndpoint { status, body });
        }

        let payload: serde_json::Value = response.json().await?;
        let access_token = payload
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or(AuthError::MissingField("access_token"))?;
        let expires_in = payload
            .get("expires_in")
            .and_then(|v| v.as_u64())
            .ok_or(AuthError::MissingField("expires_in"))?;

        self.token.access_token = access_token.to_string();
        self.token.expires_at = unix_now() + expires_in;
        if let Some(token_type) = payload.get("token_type").and_then(|v| v.as_str()) {
            self.token.token_type = token_type.to_string();
        }
        // Google only occasionally rotates refresh tokens; keep ours otherwise.
        if let Some(refresh_token) = payload.get("refresh_token").and_then(|v| v.as_str()) {
            self.token.refresh_token = refresh_token.to_string();
        }

        Ok(())
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
