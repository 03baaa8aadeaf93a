//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Change, CombinedStatus, CommitStatus, PlatformConfig, ReviewEvent, Reviewer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::Client;
use reqwest::header::{HeaderMap, LINK};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Page size for list endpoints
const PER_PAGE: u32 = 100;

#[derive(Deserialize)]
struct CombinedStatusResponse {
    state: String,
    #[serde(default)]
    total_count: Option<usize>,
    #[serde(default)]
    statuses: Vec<CommitStatus>,
}

/// One entry of the review list, state kept as GitHub spells it
#[derive(Deserialize)]
struct ReviewResponse {
    user: Option<GitHubUser>,
    #[serde(default)]
    state: String,
    submitted_at: Option<DateTime<Utc>>,
}

impl From<ReviewResponse> for ReviewEvent {
    fn from(review: ReviewResponse) -> Self {
        Self {
            reviewer: review.user.map(Reviewer::from),
            state: review.state,
            submitted_at: review.submitted_at,
        }
    }
}

#[derive(Deserialize)]
struct RequestedReviewersResponse {
    #[serde(default)]
    users: Vec<GitHubUser>,
}

#[derive(Deserialize)]
struct GitHubUser {
    id: u64,
    login: String,
    #[serde(default)]
    avatar_url: String,
}

impl From<GitHubUser> for Reviewer {
    fn from(user: GitHubUser) -> Self {
        Self {
            id: user.id,
            login: user.login,
            avatar_url: user.avatar_url,
        }
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests (statuses, reviews, requested reviewers)
    http_client: Client,
    /// API base URL, e.g. `https://api.github.com`
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service for github.com or a GitHub Enterprise host
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let api_base = config.host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, config, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::Internal(format!("invalid GitHub API URL {api_base}: {e}")))?
            .build()
            .map_err(|e| Error::Internal(format!("failed to create GitHub client: {e}")))?;

        let http_client = Client::builder()
            .user_agent(concat!("stack-status/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// Login of the user the token belongs to
    pub async fn current_user(&self) -> Result<String> {
        let user = self
            .client
            .current()
            .user()
            .await
            .map_err(|e| Error::from_octocrab(e, "authenticated user"))?;
        Ok(user.login)
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, self.config.owner, self.config.repo
        )
    }

    fn first_page_url(&self, path: &str) -> String {
        format!("{}?per_page={PER_PAGE}", self.repo_url(path))
    }

    /// GET a URL with the raw HTTP client, mapping error statuses
    async fn send_get(&self, url: &str, resource: &str) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::TransientFetch(format!("{resource}: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            debug!(%status, resource, "GitHub returned non-success");
            return Err(Error::TransientFetch(format!("{resource}: HTTP {status}")));
        }
        Ok(response)
    }

    /// GET a single page of a repository endpoint and decode JSON
    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T> {
        let response = self.send_get(&self.first_page_url(path), resource).await?;
        decode(response, resource).await
    }

    /// GET every page of a repository endpoint, following `Link: rel="next"`
    ///
    /// Pages come back in the order GitHub served them.
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<Vec<T>> {
        let mut pages = Vec::new();
        let mut next = Some(self.first_page_url(path));

        while let Some(url) = next {
            let response = self.send_get(&url, resource).await?;
            next = next_page_url(response.headers());
            pages.push(decode(response, resource).await?);
        }

        debug!(resource, pages = pages.len(), "fetched all pages");
        Ok(pages)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, resource: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| Error::TransientFetch(format!("failed to parse {resource}: {e}")))
}

/// Target of the `rel="next"` entry in a `Link` header
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        params
            .split(';')
            .any(|param| param.trim() == r#"rel="next""#)
            .then(|| {
                target
                    .trim()
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string()
            })
    })
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_change(&self, pr_number: u64) -> Result<Change> {
        debug!(pr_number, "getting PR");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await
            .map_err(|e| Error::from_octocrab(e, &format!("pull request #{pr_number}")))?;

        let change = Change {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            body: pr.body.clone(),
            // CI is reported against the head commit; the branch may live in a fork
            head_ref: pr.head.sha.clone(),
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            position: None,
        };

        debug!(pr_number, head_ref = %change.head_ref, "got PR");
        Ok(change)
    }

    async fn get_combined_status(&self, head_ref: &str) -> Result<CombinedStatus> {
        debug!(head_ref, "getting combined status");

        let path = format!("commits/{}/status", urlencoding::encode(head_ref));
        let resource = format!("combined status for {head_ref}");
        let pages: Vec<CombinedStatusResponse> = self.get_all_pages(&path, &resource).await?;

        let mut pages = pages.into_iter();
        let first = pages
            .next()
            .ok_or_else(|| Error::TransientFetch(format!("{resource}: empty response")))?;
        let total_count = first.total_count;
        let mut statuses = first.statuses;
        for page in pages {
            statuses.extend(page.statuses);
        }

        if total_count.is_some_and(|total| total > statuses.len()) {
            debug!(
                head_ref,
                total_count,
                received = statuses.len(),
                "GitHub returned fewer statuses than it counted"
            );
        }

        debug!(
            head_ref,
            state = %first.state,
            count = statuses.len(),
            "got combined status"
        );
        Ok(CombinedStatus {
            state: first.state,
            statuses,
        })
    }

    async fn get_reviews(&self, pr_number: u64) -> Result<Vec<ReviewEvent>> {
        debug!(pr_number, "listing reviews");

        let pages: Vec<Vec<ReviewResponse>> = self
            .get_all_pages(
                &format!("pulls/{pr_number}/reviews"),
                &format!("reviews for pull request #{pr_number}"),
            )
            .await?;

        let result: Vec<ReviewEvent> = pages
            .into_iter()
            .flatten()
            .map(ReviewEvent::from)
            .collect();
        debug!(pr_number, count = result.len(), "listed reviews");
        Ok(result)
    }

    async fn get_requested_reviewers(&self, pr_number: u64) -> Result<Vec<Reviewer>> {
        debug!(pr_number, "listing requested reviewers");

        let response: RequestedReviewersResponse = self
            .get_json(
                &format!("pulls/{pr_number}/requested_reviewers"),
                &format!("requested reviewers for pull request #{pr_number}"),
            )
            .await?;

        let result: Vec<Reviewer> = response.users.into_iter().map(Reviewer::from).collect();
        debug!(pr_number, count = result.len(), "listed requested reviewers");
        Ok(result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
