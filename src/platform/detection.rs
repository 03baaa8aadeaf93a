//! Repository coordinate parsing

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use url::Url;

const GITHUB_HOST: &str = "github.com";

/// Parse a repository coordinate.
///
/// Accepts `owner/repo`, `https://host/owner/repo(.git)`,
/// `ssh://git@host/owner/repo.git`, and `git@host:owner/repo.git`.
/// `default_host` applies only to the bare `owner/repo` form.
pub fn parse_repo_info(input: &str, default_host: Option<&str>) -> Result<PlatformConfig> {
    let trimmed = input.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let (host, path) = if let Some(rest) = trimmed.strip_prefix("git@") {
        let (host, path) = rest
            .split_once(':')
            .ok_or_else(|| Error::InvalidRepository(input.to_string()))?;
        (Some(host.to_string()), path.to_string())
    } else if trimmed.contains("://") {
        let url = Url::parse(trimmed)
            .map_err(|e| Error::InvalidRepository(format!("{input}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidRepository(input.to_string()))?;
        (
            Some(host.to_string()),
            url.path().trim_start_matches('/').to_string(),
        )
    } else {
        (default_host.map(ToString::to_string), trimmed.to_string())
    };

    let mut parts = path.split('/');
    let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::InvalidRepository(format!(
            "{input}: expected owner/repo"
        )));
    };
    if owner.is_empty() || repo.is_empty() {
        return Err(Error::InvalidRepository(format!(
            "{input}: expected owner/repo"
        )));
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: host.filter(|h| !is_github_dot_com(h)),
    })
}

fn is_github_dot_com(host: &str) -> bool {
    host.eq_ignore_ascii_case(GITHUB_HOST) || host.eq_ignore_ascii_case("www.github.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_owner_repo() {
        let config = parse_repo_info("owner/repo", None).unwrap();
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "repo");
        assert_eq!(config.host, None);
    }

    #[test]
    fn test_bare_uses_default_host() {
        let config = parse_repo_info("owner/repo", Some("ghe.corp.example")).unwrap();
        assert_eq!(config.host.as_deref(), Some("ghe.corp.example"));
    }

    #[test]
    fn test_github_https() {
        let config = parse_repo_info("https://github.com/owner/repo.git", None).unwrap();
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "repo");
        assert_eq!(config.host, None);
    }

    #[test]
    fn test_github_ssh() {
        let config = parse_repo_info("git@github.com:owner/repo.git", None).unwrap();
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "repo");
        assert_eq!(config.host, None);
    }

    #[test]
    fn test_ssh_url_scheme() {
        let config = parse_repo_info("ssh://git@github.com/owner/repo.git", None).unwrap();
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "repo");
    }

    #[test]
    fn test_enterprise_host_from_url() {
        let config = parse_repo_info("https://ghe.corp.example/team/service", Some("ignored")).unwrap();
        assert_eq!(config.host.as_deref(), Some("ghe.corp.example"));
        assert_eq!(config.owner, "team");
        assert_eq!(config.repo, "service");
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = parse_repo_info("https://github.com/owner/repo///", None).unwrap();
        assert_eq!(config.repo, "repo");
    }

    #[test]
    fn test_rejects_nested_paths() {
        assert!(matches!(
            parse_repo_info("https://github.com/a/b/c", None),
            Err(Error::InvalidRepository(_))
        ));
    }

    #[test]
    fn test_rejects_missing_repo() {
        for input in ["owner", "owner/", "/repo", "", "git@github.com"] {
            assert!(
                matches!(parse_repo_info(input, None), Err(Error::InvalidRepository(_))),
                "expected InvalidRepository for {input:?}"
            );
        }
    }
}
