//! Authentication for GitHub
//!
//! Supports environment variables, the `gh` CLI, and the config file.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, test_github_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from CLI tool (gh)
    Cli,
    /// Token from the config file
    ConfigFile,
}

impl std::fmt::Display for AuthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar => write!(f, "environment variable"),
            Self::Cli => write!(f, "gh CLI"),
            Self::ConfigFile => write!(f, "config file"),
        }
    }
}
