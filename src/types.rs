//! Core types for stack-status

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Repository coordinate on GitHub or GitHub Enterprise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// A pull request, as much of it as status evaluation needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR body; holds the stack footer on the root change
    pub body: Option<String>,
    /// Head ref used to query CI
    pub head_ref: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Position in the stack, 0 = base. Set during evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

// =============================================================================
// CI
// =============================================================================

/// Recognized CI states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiState {
    /// All checks passed
    Success,
    /// At least one check failed
    Failure,
    /// At least one check errored
    Error,
    /// Checks still running
    Pending,
}

impl CiState {
    /// Whether this state stops the change from merging
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Failure | Self::Error)
    }
}

impl FromStr for CiState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "error" => Ok(Self::Error),
            "pending" => Ok(Self::Pending),
            other => Err(Error::UnknownCiState(other.to_string())),
        }
    }
}

impl std::fmt::Display for CiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Error => write!(f, "error"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// One commit status exactly as the service reported it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Status ID
    pub id: u64,
    /// Check name (the status "context")
    pub context: String,
    /// Raw state string
    pub state: String,
    /// Link to the check's detail page
    pub target_url: Option<String>,
}

/// Combined CI status for a head ref, unvalidated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedStatus {
    /// Raw overall state
    pub state: String,
    /// Individual statuses in the order reported
    pub statuses: Vec<CommitStatus>,
}

/// A validated check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Status ID
    pub id: u64,
    /// Check name
    pub name: String,
    /// Check state
    pub state: CiState,
    /// Link to the check's detail page
    pub url: Option<String>,
}

impl TryFrom<&CommitStatus> for CheckResult {
    type Error = Error;

    fn try_from(status: &CommitStatus) -> Result<Self> {
        Ok(Self {
            id: status.id,
            name: status.context.clone(),
            state: status.state.parse()?,
            url: status.target_url.clone(),
        })
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// Reviewer identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    /// User ID
    pub id: u64,
    /// Login name
    pub login: String,
    /// Avatar image URL
    pub avatar_url: String,
}

/// One submitted review, in the order the service returned it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEvent {
    /// Who submitted the review; None for deleted or ghost accounts
    pub reviewer: Option<Reviewer>,
    /// Raw review state, e.g. `APPROVED`
    pub state: String,
    /// When the review was submitted
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Review actions the status fold understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Reviewer approved
    Approved,
    /// Reviewer requested changes
    ChangesRequested,
    /// Reviewer left a comment-only review
    Commented,
}

impl FromStr for ReviewAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "APPROVED" => Ok(Self::Approved),
            "CHANGES_REQUESTED" => Ok(Self::ChangesRequested),
            "COMMENTED" => Ok(Self::Commented),
            other => Err(Error::UnknownReviewState(other.to_string())),
        }
    }
}

/// Net status of one reviewer on one change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// Requested, no review yet
    Pending,
    /// Approved
    Approved,
    /// Changes requested
    ChangesRequested,
    /// Only commented
    Commented,
}

impl ReviewStatus {
    /// Transition on one incoming review action.
    ///
    /// A decision (approve / request changes) survives later comments but
    /// is replaced by the opposite decision.
    #[must_use]
    pub const fn apply(self, action: ReviewAction) -> Self {
        match (self, action) {
            (Self::Approved | Self::ChangesRequested, ReviewAction::Commented) => self,
            (_, ReviewAction::Approved) => Self::Approved,
            (_, ReviewAction::ChangesRequested) => Self::ChangesRequested,
            (Self::Pending | Self::Commented, ReviewAction::Commented) => Self::Commented,
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::ChangesRequested => write!(f, "changes requested"),
            Self::Commented => write!(f, "commented"),
        }
    }
}

/// Folded status for one reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerStatus {
    /// Current status
    pub status: ReviewStatus,
    /// Who the status belongs to
    pub reviewer_identity: Reviewer,
}

// =============================================================================
// Reports
// =============================================================================

/// Next step suggested for a change, by review state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendedAction {
    /// Some reviewer requested changes
    ChangesRequested,
    /// Approved, nobody requesting changes
    Approved,
    /// Only comments so far
    AddressComments,
    /// Nothing actionable yet
    NeedsReview,
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChangesRequested => write!(f, "changes requested"),
            Self::Approved => write!(f, "approved"),
            Self::AddressComments => write!(f, "address comments"),
            Self::NeedsReview => write!(f, "needs review"),
        }
    }
}

/// Overall standing of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Readiness {
    /// CI failing or changes requested
    Blocked,
    /// Waiting on CI, reviews, or comment follow-up
    NeedsAttention,
    /// CI green and approved
    Clear,
}

/// Consolidated status of one change in the stack
///
/// Serialized (camelCase) as:
///
/// ```json
/// {
///   "identifier": 101,
///   "title": "Base: add the parser",
///   "htmlUrl": "https://github.com/owner/repo/pull/101",
///   "position": 0,
///   "overallCIStatus": "failure",
///   "failingChecks": [{"id": 2, "name": "lint", "state": "failure", "url": null}],
///   "reviewerStatuses": {
///     "alice": {"status": "APPROVED", "reviewerIdentity": {"id": 1, "login": "alice", "avatarUrl": "..."}}
///   },
///   "recommendedAction": "approved"
/// }
/// ```
///
/// `identifier`, `title`, `overallCIStatus`, `failingChecks` and
/// `reviewerStatuses` are the core report. `htmlUrl`, `position` and
/// `recommendedAction` are extras for display; `position` is `null` for a
/// change evaluated outside a stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusReport {
    /// PR number
    pub identifier: u64,
    /// PR title
    pub title: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Position in the stack, 0 = base
    pub position: Option<usize>,
    /// Combined CI state
    #[serde(rename = "overallCIStatus")]
    pub overall_ci_status: CiState,
    /// Checks not in `success`
    pub failing_checks: Vec<CheckResult>,
    /// Reviewer login to status
    pub reviewer_statuses: BTreeMap<String, ReviewerStatus>,
    /// Suggested next step from the reviewer statuses
    pub recommended_action: RecommendedAction,
}

impl ChangeStatusReport {
    /// Classify the change for the one-glance view
    pub const fn readiness(&self) -> Readiness {
        if self.overall_ci_status.is_blocking()
            || matches!(self.recommended_action, RecommendedAction::ChangesRequested)
        {
            Readiness::Blocked
        } else if matches!(self.overall_ci_status, CiState::Success)
            && matches!(self.recommended_action, RecommendedAction::Approved)
        {
            Readiness::Clear
        } else {
            Readiness::NeedsAttention
        }
    }
}

/// Status of every change in a stack, base first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackReport {
    /// PR number the stack was discovered from
    pub root: u64,
    /// One report per change, in dependency order
    pub changes: Vec<ChangeStatusReport>,
}

impl StackReport {
    /// Number of changes with the given readiness
    pub fn count(&self, readiness: Readiness) -> usize {
        self.changes
            .iter()
            .filter(|c| c.readiness() == readiness)
            .count()
    }
}
