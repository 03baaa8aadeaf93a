//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use stack_status::error::{Error, Result};
use stack_status::platform::PlatformService;
use stack_status::types::{
    Change, CombinedStatus, CommitStatus, PlatformConfig, ReviewEvent, Reviewer,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// to keep response setup and call tracking explicit.
///
/// Features:
/// - Configurable responses per PR / head ref
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - Optional per-PR latency with in-flight tracking for concurrency tests
pub struct MockPlatformService {
    config: PlatformConfig,
    changes: Mutex<HashMap<u64, Change>>,
    combined_statuses: Mutex<HashMap<String, CombinedStatus>>,
    reviews: Mutex<HashMap<u64, Vec<ReviewEvent>>>,
    requested_reviewers: Mutex<HashMap<u64, Vec<Reviewer>>>,
    // Call tracking
    get_change_calls: Mutex<Vec<u64>>,
    get_combined_status_calls: Mutex<Vec<String>>,
    get_reviews_calls: Mutex<Vec<u64>>,
    get_requested_reviewers_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_get_change: Mutex<HashMap<u64, String>>,
    error_on_get_reviews: Mutex<HashMap<u64, String>>,
    // Latency simulation
    delays: Mutex<HashMap<u64, Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            changes: Mutex::new(HashMap::new()),
            combined_statuses: Mutex::new(HashMap::new()),
            reviews: Mutex::new(HashMap::new()),
            requested_reviewers: Mutex::new(HashMap::new()),
            get_change_calls: Mutex::new(Vec::new()),
            get_combined_status_calls: Mutex::new(Vec::new()),
            get_reviews_calls: Mutex::new(Vec::new()),
            get_requested_reviewers_calls: Mutex::new(Vec::new()),
            error_on_get_change: Mutex::new(HashMap::new()),
            error_on_get_reviews: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    // === Error injection methods ===

    /// Make `get_change` fail with a transient error for one PR
    pub fn fail_get_change(&self, pr_number: u64, msg: &str) {
        self.error_on_get_change
            .lock()
            .unwrap()
            .insert(pr_number, msg.to_string());
    }

    /// Make `get_reviews` fail with a transient error for one PR
    pub fn fail_get_reviews(&self, pr_number: u64, msg: &str) {
        self.error_on_get_reviews
            .lock()
            .unwrap()
            .insert(pr_number, msg.to_string());
    }

    /// Delay `get_change` for one PR
    pub fn set_delay(&self, pr_number: u64, delay: Duration) {
        self.delays.lock().unwrap().insert(pr_number, delay);
    }

    // === Response setup ===

    /// Set the change returned for a PR
    pub fn set_change(&self, change: Change) {
        self.changes.lock().unwrap().insert(change.number, change);
    }

    /// Set the combined status returned for a head ref
    pub fn set_combined_status(&self, head_ref: &str, status: CombinedStatus) {
        self.combined_statuses
            .lock()
            .unwrap()
            .insert(head_ref.to_string(), status);
    }

    /// Set the reviews returned for a PR
    pub fn set_reviews(&self, pr_number: u64, reviews: Vec<ReviewEvent>) {
        self.reviews.lock().unwrap().insert(pr_number, reviews);
    }

    /// Set the requested reviewers returned for a PR
    pub fn set_requested_reviewers(&self, pr_number: u64, reviewers: Vec<Reviewer>) {
        self.requested_reviewers
            .lock()
            .unwrap()
            .insert(pr_number, reviewers);
    }

    /// Helper to set up a PR with a body, a CI state, and no reviews
    pub fn setup_change(&self, pr_number: u64, title: &str, body: Option<&str>, ci_state: &str) {
        let head_ref = head_ref_for(pr_number);
        self.set_change(Change {
            number: pr_number,
            title: title.to_string(),
            body: body.map(ToString::to_string),
            head_ref: head_ref.clone(),
            html_url: format!("https://github.com/test/repo/pull/{pr_number}"),
            position: None,
        });
        self.set_combined_status(
            &head_ref,
            CombinedStatus {
                state: ci_state.to_string(),
                statuses: vec![],
            },
        );
    }

    /// Helper to set up the checks behind a PR's combined status
    pub fn set_checks(&self, pr_number: u64, overall: &str, checks: Vec<CommitStatus>) {
        self.set_combined_status(
            &head_ref_for(pr_number),
            CombinedStatus {
                state: overall.to_string(),
                statuses: checks,
            },
        );
    }

    // === Call verification methods ===

    /// Get all PR numbers `get_change` was called with
    pub fn get_change_calls(&self) -> Vec<u64> {
        self.get_change_calls.lock().unwrap().clone()
    }

    /// Get all head refs `get_combined_status` was called with
    pub fn get_combined_status_calls(&self) -> Vec<String> {
        self.get_combined_status_calls.lock().unwrap().clone()
    }

    /// Get all PR numbers `get_reviews` was called with
    pub fn get_reviews_calls(&self) -> Vec<u64> {
        self.get_reviews_calls.lock().unwrap().clone()
    }

    /// Get all PR numbers `get_requested_reviewers` was called with
    pub fn get_requested_reviewers_calls(&self) -> Vec<u64> {
        self.get_requested_reviewers_calls.lock().unwrap().clone()
    }

    /// Highest number of concurrent `get_change` calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Assert that `get_change` was called for each PR
    pub fn assert_get_change_called_for(&self, numbers: &[u64]) {
        let calls = self.get_change_calls();
        for number in numbers {
            assert!(
                calls.contains(number),
                "Expected get_change({number}) but got: {calls:?}"
            );
        }
    }
}

/// Head ref the helpers assign to a PR
pub fn head_ref_for(pr_number: u64) -> String {
    format!("sha-{pr_number}")
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_change(&self, pr_number: u64) -> Result<Change> {
        self.get_change_calls.lock().unwrap().push(pr_number);

        let delay = self.delays.lock().unwrap().get(&pr_number).copied();
        if let Some(delay) = delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        // Check for injected error
        if let Some(msg) = self.error_on_get_change.lock().unwrap().get(&pr_number) {
            return Err(Error::TransientFetch(msg.clone()));
        }

        self.changes
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("pull request #{pr_number}")))
    }

    async fn get_combined_status(&self, head_ref: &str) -> Result<CombinedStatus> {
        self.get_combined_status_calls
            .lock()
            .unwrap()
            .push(head_ref.to_string());

        self.combined_statuses
            .lock()
            .unwrap()
            .get(head_ref)
            .cloned()
            .ok_or_else(|| {
                Error::TransientFetch(format!(
                    "get_combined_status: no response configured for {head_ref}"
                ))
            })
    }

    async fn get_reviews(&self, pr_number: u64) -> Result<Vec<ReviewEvent>> {
        self.get_reviews_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_get_reviews.lock().unwrap().get(&pr_number) {
            return Err(Error::TransientFetch(msg.clone()));
        }

        Ok(self
            .reviews
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_requested_reviewers(&self, pr_number: u64) -> Result<Vec<Reviewer>> {
        self.get_requested_reviewers_calls
            .lock()
            .unwrap()
            .push(pr_number);

        Ok(self
            .requested_reviewers
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
