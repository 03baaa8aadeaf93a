//! stack-status: review and CI status for stacked pull requests
//!
//! Given the top pull request of a stack, finds every PR the stack footer
//! lists and reports each one's CI outcome and reviewer standing.

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod review;
pub mod stack;
pub mod status;
pub mod types;
