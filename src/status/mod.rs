//! Status engine for stacked PRs
//!
//! Two phases:
//! 1. Gather - fetch every change in the stack concurrently (effectful)
//! 2. Aggregate - fold reviews and CI into one report per change (pure, testable)

mod aggregate;
mod evaluate;

pub use aggregate::{aggregate, recommend_action, summarize_checks};
pub use evaluate::{evaluate_change, evaluate_stack};
