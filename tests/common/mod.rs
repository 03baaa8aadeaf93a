//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{MockPlatformService, head_ref_for};

use chrono::{TimeZone, Utc};
use stack_status::types::{CommitStatus, PlatformConfig, ReviewEvent, Reviewer};

/// Config for a github.com repository
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// Mock platform pointed at `test/repo`
pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::with_config(github_config())
}

/// PR description carrying a stack footer
///
/// `top_first` lists PR numbers the way the footer does: the top of the
/// stack first, the base last.
pub fn stack_body(summary: &str, top_first: &[u64]) -> String {
    let mut body = format!("{summary}\n\nStack from [ghstack](https://github.com/ezyang/ghstack):\n");
    for (i, number) in top_first.iter().enumerate() {
        let marker = if i == 0 { "__->__ " } else { "" };
        body.push_str(&format!("* {marker}#{number}\n"));
    }
    body
}

/// Reviewer with a login derived id
pub fn reviewer(login: &str) -> Reviewer {
    Reviewer {
        id: login.bytes().map(u64::from).sum(),
        login: login.to_string(),
        avatar_url: format!("https://avatars.example.com/{login}"),
    }
}

/// Submitted review by `login`
pub fn review(login: &str, state: &str, minute: u32) -> ReviewEvent {
    ReviewEvent {
        reviewer: Some(reviewer(login)),
        state: state.to_string(),
        submitted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).single(),
    }
}

/// Commit status for a single CI context
pub fn commit_status(id: u64, context: &str, state: &str) -> CommitStatus {
    CommitStatus {
        id,
        context: context.to_string(),
        state: state.to_string(),
        target_url: Some(format!("https://ci.example.com/builds/{id}")),
    }
}
