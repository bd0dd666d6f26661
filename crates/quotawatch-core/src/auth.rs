//! OAuth credentials sourced from Claude Code's credential store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const CLIENT_ID: &str = "9d1c250a-e61b-44d9-88ed-5944d1962f5e";
const TOKEN_URL: &str = "https://console.anthropic.com/v1/oauth/token";

#[derive(Debug, Deserialize)]
struct CredentialFile {
    #[serde(rename = "claudeAiOauth")]
    claude_ai_oauth: Option<OauthEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OauthEntry {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Tokens read from the credential store.
#[derive(Debug, Clone)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Default location of Claude Code's credentials file.
pub fn credentials_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".claude").join(".credentials.json"))
}

/// Read OAuth tokens from the default credentials file.
pub fn read_tokens() -> Result<Tokens> {
    let path = credentials_path().context("Could not determine home directory")?;
    read_tokens_from(&path)
}

/// Read OAuth tokens from a specific credentials file.
pub fn read_tokens_from(path: &Path) -> Result<Tokens> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read credentials file: {}", path.display()))?;

    let file: CredentialFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse credentials file: {}", path.display()))?;

    let oauth = file.claude_ai_oauth.context(
        "No claudeAiOauth entry found in credentials. Is Claude Code signed in?",
    )?;

    Ok(Tokens {
        access_token: oauth.access_token,
        refresh_token: oauth.refresh_token,
    })
}

/// Exchange a refresh token for a new access token.
pub async fn refresh_access_token(
    http: &reqwest::Client,
    refresh_token: &str,
) -> Result<String> {
    let params = [
        ("grant_type", "refresh_token"),
        ("client_id", CLIENT_ID),
        ("refresh_token", refresh_token),
    ];

    let resp = http
        .post(TOKEN_URL)
        .form(&params)
        .send()
        .await
        .context("Token refresh request failed")?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Token refresh failed ({status}): {body}");
    }

    let token: TokenResponse = resp
        .json()
        .await
        .context("Failed to parse token response")?;

    Ok(token.access_token)
}
