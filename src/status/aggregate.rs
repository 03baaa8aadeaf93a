//! Status aggregation - pure functions for building change reports
//!
//! No I/O happens here. Everything is passed in by the evaluator, which
//! makes the decision logic easy to unit test.

use crate::error::Result;
use crate::types::{
    Change, ChangeStatusReport, CheckResult, CiState, CommitStatus, RecommendedAction,
    ReviewStatus, ReviewerStatus,
};
use std::collections::BTreeMap;

/// Validate raw commit statuses and keep only the ones not in `success`
pub fn summarize_checks(statuses: &[CommitStatus]) -> Result<Vec<CheckResult>> {
    let mut failing = Vec::new();
    for status in statuses {
        let check = CheckResult::try_from(status)?;
        if check.state != CiState::Success {
            failing.push(check);
        }
    }
    Ok(failing)
}

/// Pick the next step for a change from its reviewer statuses.
///
/// Precedence: changes requested, then approved, then comments, then
/// needs review. No reviewers at all means it needs review.
pub fn recommend_action<'a, I>(statuses: I) -> RecommendedAction
where
    I: IntoIterator<Item = &'a ReviewerStatus>,
{
    let mut approved = false;
    let mut commented = false;
    for s in statuses {
        match s.status {
            ReviewStatus::ChangesRequested => return RecommendedAction::ChangesRequested,
            ReviewStatus::Approved => approved = true,
            ReviewStatus::Commented => commented = true,
            ReviewStatus::Pending => {}
        }
    }

    if approved {
        RecommendedAction::Approved
    } else if commented {
        RecommendedAction::AddressComments
    } else {
        RecommendedAction::NeedsReview
    }
}

/// Combine one change's CI results and reviewer statuses into a report
///
/// # Arguments
/// * `change` - The change record
/// * `checks` - Raw commit statuses for the change's head ref
/// * `reviewer_statuses` - Output of `fold_reviewer_statuses`
/// * `overall_ci_state` - Raw combined state from the service
pub fn aggregate(
    change: &Change,
    checks: &[CommitStatus],
    reviewer_statuses: BTreeMap<String, ReviewerStatus>,
    overall_ci_state: &str,
) -> Result<ChangeStatusReport> {
    let overall_ci_status: CiState = overall_ci_state.parse()?;
    let failing_checks = summarize_checks(checks)?;
    let recommended_action = recommend_action(reviewer_statuses.values());

    Ok(ChangeStatusReport {
        identifier: change.number,
        title: change.title.clone(),
        html_url: change.html_url.clone(),
        position: change.position,
        overall_ci_status,
        failing_checks,
        reviewer_statuses,
        recommended_action,
    })
}
