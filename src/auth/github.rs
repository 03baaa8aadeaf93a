//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use crate::platform::GitHubService;
use crate::types::PlatformConfig;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// The token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
    /// GitHub Enterprise host the token is for; None for github.com
    pub host: Option<String>,
}

/// Find a GitHub token.
///
/// Order: `GH_TOKEN`, `GITHUB_TOKEN`, `gh auth token`, then `config_token`.
pub async fn get_github_auth(
    host: Option<&str>,
    config_token: Option<&str>,
) -> Result<GitHubAuthConfig> {
    if let Some(token) = token_from_env(|key| std::env::var(key).ok()) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
            host: host.map(ToString::to_string),
        });
    }

    if let Some(token) = token_from_gh_cli(host).await {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
            host: host.map(ToString::to_string),
        });
    }

    if let Some(token) = non_empty(config_token) {
        debug!("using GitHub token from config file");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::ConfigFile,
            host: host.map(ToString::to_string),
        });
    }

    Err(Error::Auth(
        "no GitHub token found. Set GH_TOKEN or GITHUB_TOKEN, run 'gh auth login', \
         or add `token` under [github] in the config file"
            .to_string(),
    ))
}

/// Verify the token works and return the login it belongs to
pub async fn test_github_auth(auth: &GitHubAuthConfig) -> Result<String> {
    let service = GitHubService::new(
        &auth.token,
        PlatformConfig {
            owner: String::new(),
            repo: String::new(),
            host: auth.host.clone(),
        },
    )?;

    service.current_user().await.map_err(|e| match e {
        Error::NotFound(_) => Error::Auth("token was rejected by GitHub".to_string()),
        Error::TransientFetch(msg) => Error::Auth(format!("token check failed: {msg}")),
        other => other,
    })
}

fn token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .find_map(|key| non_empty(lookup(key).as_deref()))
}

async fn token_from_gh_cli(host: Option<&str>) -> Option<String> {
    let mut cmd = Command::new("gh");
    cmd.args(["auth", "token"]);
    if let Some(h) = host {
        cmd.args(["--hostname", h]);
    }

    match cmd.output().await {
        Ok(output) if output.status.success() => {
            non_empty(Some(String::from_utf8_lossy(&output.stdout).as_ref()))
        }
        Ok(output) => {
            debug!(status = %output.status, "gh auth token failed");
            None
        }
        Err(e) => {
            debug!(error = %e, "gh CLI not available");
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
