//! Stack evaluation - effectful operations
//!
//! Fetches every change in the stack through the platform API and hands the
//! results to the pure aggregation code. Per-change fetches run concurrently
//! and are joined before any report is returned.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::review::fold_reviewer_statuses;
use crate::stack::locate;
use crate::status::aggregate::aggregate;
use crate::types::{ChangeStatusReport, StackReport};
use futures::future::try_join_all;
use tracing::debug;

/// Evaluate a single change (EFFECTFUL)
///
/// Fetches the change, then its combined CI status, reviews, and requested
/// reviewers concurrently.
pub async fn evaluate_change(
    platform: &dyn PlatformService,
    pr_number: u64,
    position: Option<usize>,
) -> Result<ChangeStatusReport> {
    debug!(pr_number, "evaluating change");
    let mut change = platform.get_change(pr_number).await?;
    change.position = position;

    let (combined, reviews, requested) = futures::try_join!(
        platform.get_combined_status(&change.head_ref),
        platform.get_reviews(pr_number),
        platform.get_requested_reviewers(pr_number),
    )?;

    let reviewer_statuses = fold_reviewer_statuses(&requested, &reviews)?;
    let report = aggregate(
        &change,
        &combined.statuses,
        reviewer_statuses,
        &combined.state,
    )?;

    debug!(
        pr_number,
        ci = %report.overall_ci_status,
        action = %report.recommended_action,
        "evaluated change"
    );
    Ok(report)
}

/// Evaluate the whole stack declared by a root change (EFFECTFUL)
///
/// The root's description footer determines which changes are evaluated and
/// in what order. The first failure aborts the evaluation; no partial stack
/// is ever returned.
///
/// # Arguments
/// * `platform` - Platform service for API calls
/// * `root` - PR number carrying the stack footer (usually the top of the stack)
pub async fn evaluate_stack(platform: &dyn PlatformService, root: u64) -> Result<StackReport> {
    debug!(root, "fetching root change");
    let root_change = platform.get_change(root).await?;

    let numbers = locate(root_change.body.as_deref().unwrap_or_default()).inspect_err(|e| {
        debug!(root, error = %e, "stack footer rejected");
    })?;
    debug!(root, count = numbers.len(), ?numbers, "located stack");

    let changes = try_join_all(
        numbers
            .iter()
            .enumerate()
            .map(|(position, &number)| evaluate_change(platform, number, Some(position))),
    )
    .await?;

    Ok(StackReport { root, changes })
}
