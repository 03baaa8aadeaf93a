//! Reviewer status folding
//!
//! Pure functions only. The full review history is replayed on every
//! evaluation; nothing is cached between runs.

use crate::error::{Error, Result};
use crate::types::{ReviewAction, ReviewEvent, ReviewStatus, Reviewer, ReviewerStatus};
use std::collections::{BTreeMap, HashSet};

/// Fold requested reviewers and the chronological review history into one
/// status per reviewer login.
///
/// Requested reviewers start at [`ReviewStatus::Pending`]. Each event is
/// applied with [`ReviewStatus::apply`]. Reviewers who were never requested
/// and only ever commented are dropped from the result.
pub fn fold_reviewer_statuses(
    requested: &[Reviewer],
    events: &[ReviewEvent],
) -> Result<BTreeMap<String, ReviewerStatus>> {
    let mut statuses: BTreeMap<String, ReviewerStatus> = requested
        .iter()
        .map(|reviewer| {
            (
                reviewer.login.clone(),
                ReviewerStatus {
                    status: ReviewStatus::Pending,
                    reviewer_identity: reviewer.clone(),
                },
            )
        })
        .collect();

    for event in events {
        let reviewer = event
            .reviewer
            .as_ref()
            .filter(|r| !r.login.is_empty())
            .ok_or(Error::UnattributedReview)?;
        let action: ReviewAction = event.state.parse()?;

        let entry = statuses
            .entry(reviewer.login.clone())
            .or_insert_with(|| ReviewerStatus {
                status: ReviewStatus::Pending,
                reviewer_identity: reviewer.clone(),
            });
        entry.status = entry.status.apply(action);
    }

    let requested_logins: HashSet<&str> = requested.iter().map(|r| r.login.as_str()).collect();
    statuses.retain(|login, s| {
        s.status != ReviewStatus::Commented || requested_logins.contains(login.as_str())
    });

    Ok(statuses)
}
