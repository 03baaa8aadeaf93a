//! Platform services
//!
//! The status engine only talks to the code-review service through
//! [`PlatformService`], so tests can swap in a mock.

mod detection;
mod github;

pub use detection::parse_repo_info;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Change, CombinedStatus, PlatformConfig, ReviewEvent, Reviewer};
use async_trait::async_trait;

/// Platform service trait for fetching change data
///
/// Calls for different PRs are independent and may run concurrently.
/// Implementations own any timeout behavior; callers never retry.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get a PR's record
    ///
    /// Fails with `NotFound` if the PR does not exist.
    async fn get_change(&self, pr_number: u64) -> Result<Change>;

    /// Get the combined CI status for a head ref
    async fn get_combined_status(&self, head_ref: &str) -> Result<CombinedStatus>;

    /// Get every review on a PR, oldest first
    async fn get_reviews(&self, pr_number: u64) -> Result<Vec<ReviewEvent>>;

    /// Get the users currently requested to review a PR
    async fn get_requested_reviewers(&self, pr_number: u64) -> Result<Vec<Reviewer>>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
