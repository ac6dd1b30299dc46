//! One-shot PKCE authorization-code flow with a local callback server.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::token::{GOOGLE_TOKEN_URL, StoredToken, unix_now};
use crate::{AuthError, YOUTUBE_SCOPE};

/// Port the registered redirect URI points at.
pub const OAUTH_CALLBACK_PORT: u16 = 8080;

/// How long to wait for the operator to finish authorizing in the browser.
const AUTH_TIMEOUT_SECS: u64 = 300;

/// Runs the interactive authorization flow and returns a token ready to be
/// saved: prints the consent URL, waits for the browser redirect on the
/// local callback server, then exchanges the code.
pub async fn run_auth_flow(client_id: &str, client_secret: &str) -> Result<StoredToken, AuthError> {
    let redirect_uri = format!("http://localhost:{}/oauth2callback", OAUTH_CALLBACK_PORT);
    let (verifier, challenge) = pkce_pair();
    let auth_url = authorization_url(client_id, &redirect_uri, &challenge);

    eprintln!("\n=================================================");
    eprintln!("OAuth 2.0 Authorization Required");
    eprintln!("=================================================");
    eprintln!("\nPlease visit the following URL to authorize the application:\n");
    eprintln!("{}\n", auth_url);
    eprintln!("Waiting for authorization...");
    eprintln!("=================================================\n");

    let code = wait_for_callback().await?;

    exchange_code(client_id, client_secret, &redirect_uri, &code, &verifier).await
}

/// Random PKCE verifier and its S256 challenge.
fn pkce_pair() -> (String, String) {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use rand::Rng;
    use rand::distributions::Alphanumeric;
    use sha2::{Digest, Sha256};

    let verifier: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    let challenge = URL_SAFE_NO_PAD.encode(hasher.finalize());

    (verifier, challenge)
}

fn authorization_url(client_id: &str, redirect_uri: &str, challenge: &str) -> String {
    format!(
        "https://accounts.google.com/o/oauth2/v2/auth?\
        client_id={}&\
        redirect_uri={}&\
        response_type=code&\
        scope={}&\
        code_challenge={}&\
        code_challenge_method=S256&\
        access_type=offline&\
        prompt=consent",
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(YOUTUBE_SCOPE),
        urlencoding::encode(challenge),
    )
}

/// Serves the redirect endpoint until an authorization code (or an error
/// from Google) arrives, or the timeout passes.
async fn wait_for_callback() -> Result<String, AuthError> {
    use axum::{
        Router,
        extract::Query,
        response::{Html, IntoResponse},
        routing::get,
    };

    #[derive(Deserialize)]
    struct Callback {
        code: Option<String>,
        error: Option<String>,
    }

    // Either the authorization code or Google's error string.
    let outcome = Arc::new(Mutex::new(None::<Result<String, String>>));
    let outcome_writer = outcome.clone();

    let handler = move |Query(params): Query<Callback>| async move {
        if let Some(error) = params.error {
            *outcome_writer.lock().await = Some(Err(error.clone()));
            return Html(format!(
                "<html><body><h1>Authorization Failed</h1><p>Error: {}</p>\
                <p>You can close this window.</p></body></html>",
                error
            ))
            .into_response();
        }
        if let Some(code) = params.code {
            *outcome_writer.lock().await = Some(Ok(code));
            return Html(
                "<html><body><h1>Authorization Successful!</h1>\
                <p>You can close this window and return to the application.</p></body></html>",
            )
            .into_response();
        }
        Html("<html><body><h1>Authorization Failed</h1><p>No code received</p></body></html>")
            .into_response()
    };

    let app = Router::new().route("/oauth2callback", get(handler));
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", OAUTH_CALLBACK_PORT))
        .await
        .map_err(AuthError::Listener)?;
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(AUTH_TIMEOUT_SECS);
    let result = loop {
        if tokio::time::Instant::now() > deadline {
            break Err(AuthError::Timeout(AUTH_TIMEOUT_SECS));
        }
        if let Some(outcome) = outcome.lock().await.take() {
            break outcome.map_err(AuthError::Callback);
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
    };

    server_handle.abort();
    result
}

async fn exchange_code(
    client_id: &str,
    client_secret: &str,
    redirect_uri: &str,
    code: &str,
    verifier: &str,
) -> Result<StoredToken, AuthError> {
    eprintln!("Exchanging authorization code for tokens...");

    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("code_verifier", verifier),
        ("grant_type", "authorization_code"),
        ("redirect_uri", redirect_uri),
    ];

    let client = reqwest::Client::new();
    let response = client.post(GOOGLE_TOKEN_URL).form(&params).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenEndpoint { status, body });
    }

    let payload: serde_json::Value = response.json().await?;
    let field = |name: &'static str| -> Result<String, AuthError> {
        payload
            .get(name)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(AuthError::MissingField(name))
    };

    let expires_in = payload
        .get("expires_in")
        .and_then(|v| v.as_u64())
        .ok_or(AuthError::MissingField("expires_in"))?;

    let token = StoredToken {
        client_id: client_id.to_string(),
        client_secret: client_secret.to_string(),
        access_token: field("access_token")?,
        refresh_token: field("refresh_token")?,
        token_type: field("token_type").unwrap_or_else(|_| "Bearer".to_string()),
        expires_at: unix_now() + expires_in,
    };

    eprintln!("Successfully obtained OAuth tokens");
    Ok(token)
}
