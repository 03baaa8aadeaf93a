//! Auth command - check GitHub credentials

use crate::cli::style::{Stylize, check};
use anstream::println;
use stack_status::auth::{get_github_auth, test_github_auth};
use stack_status::config::load_config;
use stack_status::error::Result;
use std::path::Path;

/// Run the auth command
pub async fn run_auth(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let host = config.github.host.as_deref();

    let auth = get_github_auth(host, config.github.token.as_deref()).await?;
    let login = test_github_auth(&auth).await?;

    println!(
        "{} Authenticated to {} as {} {}",
        check(),
        host.unwrap_or("github.com").emphasis(),
        login.accent(),
        format!("(token from {})", auth.source).muted()
    );
    Ok(())
}
