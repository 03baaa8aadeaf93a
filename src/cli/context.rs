//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by the status and auth commands.

use stack_status::auth::get_github_auth;
use stack_status::config::{Config, load_config};
use stack_status::error::{Error, Result};
use stack_status::platform::{GitHubService, parse_repo_info};
use stack_status::types::PlatformConfig;
use std::path::Path;
use tracing::debug;

/// Shared context for CLI commands that talk to GitHub
///
/// This struct encapsulates the setup needed before evaluating a stack:
/// - Loading the config file
/// - Resolving the repository coordinate
/// - Finding a token
/// - Creating the platform service
pub struct CommandContext {
    /// Platform service
    pub platform: GitHubService,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new(repo: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)?;
        let platform_config = resolve_repository(repo, &config)?;
        debug!(
            owner = %platform_config.owner,
            repo = %platform_config.repo,
            host = ?platform_config.host,
            "resolved repository"
        );

        let auth = get_github_auth(
            platform_config.host.as_deref(),
            config.github.token.as_deref(),
        )
        .await?;
        debug!(source = %auth.source, "using GitHub token");

        let platform = GitHubService::new(&auth.token, platform_config)?;

        Ok(Self { platform })
    }
}

/// Pick the repository from the `--repo` flag, falling back to the config
pub fn resolve_repository(flag: Option<&str>, config: &Config) -> Result<PlatformConfig> {
    let coordinate = flag
        .or(config.github.repo.as_deref())
        .ok_or_else(|| Error::InvalidRepository("no repository given".to_string()))?;

    parse_repo_info(coordinate, config.github.host.as_deref())
}
