//! Status command - show CI and review status for a stack

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, ci_label, readiness_marker, review_label, spinner_style};
use anstream::println;
use indicatif::ProgressBar;
use stack_status::error::{Error, Result};
use stack_status::platform::PlatformService;
use stack_status::status::evaluate_stack;
use stack_status::types::{ChangeStatusReport, CheckResult, Readiness, StackReport};
use std::path::Path;
use std::time::Duration;
use supports_hyperlinks::Stream;
use terminal_link::Link;

/// Options for the status command
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Print JSON instead of the human-readable report
    pub json: bool,
}

/// Run the status command
pub async fn run_status(
    pr: u64,
    repo: Option<&str>,
    config_path: Option<&Path>,
    options: StatusOptions,
) -> Result<()> {
    let ctx = CommandContext::new(repo, config_path).await?;
    let config = ctx.platform.config();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Fetching stack for {}/{}#{pr}...",
        config.owner, config.repo
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = evaluate_stack(&ctx.platform, pr).await;
    spinner.finish_and_clear();
    let report = result?;

    if options.json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| Error::Internal(format!("failed to serialize report: {e}")))?;
        println!("{body}");
    } else {
        print_stack_report(&report, &format!("{}/{}", config.owner, config.repo));
    }

    Ok(())
}

fn print_stack_report(report: &StackReport, repo: &str) {
    println!(
        "{} {} {}",
        "Stack".emphasis(),
        format!("{repo}#{}", report.root).accent(),
        format!("({} PRs, base first)", report.changes.len()).muted()
    );
    println!();

    for change in &report.changes {
        print_change(change);
    }

    println!(
        "{} clear, {} need attention, {} blocked",
        report.count(Readiness::Clear).success(),
        report.count(Readiness::NeedsAttention).warn(),
        report.count(Readiness::Blocked).error()
    );
}

fn print_change(change: &ChangeStatusReport) {
    println!(
        "{} {} {}",
        readiness_marker(change.readiness()),
        format!("#{}", change.identifier).accent(),
        change.title.emphasis()
    );
    println!(
        "    CI: {}   Review: {}",
        ci_label(change.overall_ci_status),
        change.recommended_action
    );

    for check in &change.failing_checks {
        println!("    {} {} {}", ci_label(check.state), check.name, check_link(check));
    }

    if !change.reviewer_statuses.is_empty() {
        let reviewers: Vec<String> = change
            .reviewer_statuses
            .iter()
            .map(|(login, s)| format!("{login} {}", review_label(s.status)))
            .collect();
        println!("    {}", reviewers.join(", "));
    }

    println!();
}

fn check_link(check: &CheckResult) -> String {
    let Some(url) = check.url.as_deref() else {
        return String::new();
    };
    if supports_hyperlinks::on(Stream::Stdout) {
        Link::new("details", url).to_string().muted()
    } else {
        url.muted()
    }
}
