//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips ANSI codes when the stream
//! is not a terminal, so styling here is unconditional.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use stack_status::types::{CiState, Readiness, ReviewStatus};
use std::fmt::Display;

/// Check mark
pub const CHECK: &str = "✓";
/// Cross mark
pub const CROSS: &str = "✗";
/// Dot for in-between states
pub const DOT: &str = "●";

/// Semantic styles for terminal text
pub trait Stylize: Display {
    /// Bold
    fn emphasis(&self) -> String {
        self.to_string().bold().to_string()
    }

    /// Dimmed, for secondary information
    fn muted(&self) -> String {
        self.to_string().dimmed().to_string()
    }

    /// Cyan, for identifiers
    fn accent(&self) -> String {
        self.to_string().cyan().to_string()
    }

    /// Green
    fn success(&self) -> String {
        self.to_string().green().to_string()
    }

    /// Yellow
    fn warn(&self) -> String {
        self.to_string().yellow().to_string()
    }

    /// Bold red
    fn error(&self) -> String {
        self.to_string().red().bold().to_string()
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Spinner used while waiting on the network
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

/// Marker for a change's readiness
pub fn readiness_marker(readiness: Readiness) -> String {
    match readiness {
        Readiness::Clear => CHECK.success(),
        Readiness::NeedsAttention => DOT.warn(),
        Readiness::Blocked => CROSS.error(),
    }
}

/// Colored CI state label
pub fn ci_label(state: CiState) -> String {
    match state {
        CiState::Success => state.success(),
        CiState::Pending => state.warn(),
        CiState::Failure | CiState::Error => state.error(),
    }
}

/// Colored reviewer status label
pub fn review_label(status: ReviewStatus) -> String {
    match status {
        ReviewStatus::Approved => status.success(),
        ReviewStatus::ChangesRequested => status.error(),
        ReviewStatus::Commented => status.warn(),
        ReviewStatus::Pending => status.muted(),
    }
}
