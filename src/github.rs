//! GitHub as the repository source: a mockable trait for fetching one page at
//! a time, plus the driver loop that pages until the provider reports no next
//! page. The real client talks to the REST API with `reqwest` and derives the
//! next page number from the `Link` response header, the same signal the
//! provider's official clients use.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

const GITHUB_API_URL: &str = "https://api.github.com";

/// 100 is the provider's maximum page size; fewer round trips per run.
const PAGE_SIZE: u32 = 100;
const FIRST_PAGE: u32 = 1;

/// Provider-native repository record, as deserialized from the listing
/// endpoint. Owned transiently; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
    pub html_url: String,
}

/// One page of results together with the provider-supplied pointer to the
/// next page. `next_page == None` means the listing is exhausted.
#[derive(Debug, Clone)]
pub struct RepositoryPage {
    pub repositories: Vec<RawRepository>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("github request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success HTTP response, including auth failures and rate limiting.
    /// Surfaced as-is; this client never backs off or retries.
    #[error("github responded with {status} on page {page}: {message}")]
    Api {
        status: StatusCode,
        page: u32,
        message: String,
    },
}

/// Source of repository pages. Implemented by the real GitHub client and by
/// stubs/mocks in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetch a single page of the organization's repositories. Pure with
    /// respect to the loop driving it: no cursor state lives in the source.
    async fn fetch_page(
        &self,
        organization: &str,
        page: u32,
    ) -> Result<RepositoryPage, ProviderError>;
}

/// Pages through the whole organization, accumulating in provider page order.
/// Aborts on the first failed page; accumulated items are discarded with it.
pub async fn list_all_repositories(
    source: &dyn RepositorySource,
    organization: &str,
) -> Result<Vec<RawRepository>, ProviderError> {
    let mut all = Vec::new();
    let mut cursor = Some(FIRST_PAGE);

    while let Some(page) = cursor {
        debug!(organization, page, "Fetching repository page");
        let fetched = source.fetch_page(organization, page).await?;
        debug!(
            organization,
            page,
            count = fetched.repositories.len(),
            next_page = ?fetched.next_page,
            "Fetched repository page"
        );
        all.extend(fetched.repositories);
        cursor = fetched.next_page;
    }

    info!(organization, repositories = all.len(), "Listed all repositories");
    Ok(all)
}

/// Authenticated client for the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("repo-cache/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GitHubClient {
            http,
            token: token.into(),
            base_url: GITHUB_API_URL.to_string(),
        })
    }

    /// Point the client at a different API root, e.g. GitHub Enterprise.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_page(
        &self,
        organization: &str,
        page: u32,
    ) -> Result<RepositoryPage, ProviderError> {
        let url = format!("{}/orgs/{}/repos", self.base_url, organization);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .query(&[("per_page", PAGE_SIZE), ("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(organization, page, %status, "GitHub rejected repository listing");
            return Err(ProviderError::Api {
                status,
                page,
                message,
            });
        }

        let next_page = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_number);
        let repositories = response.json::<Vec<RawRepository>>().await?;

        Ok(RepositoryPage {
            repositories,
            next_page,
        })
    }
}

/// Extracts the page number of the `rel="next"` entry from a `Link` header,
/// if any. A header without a next entry means the current page is the last.
fn next_page_number(link: &str) -> Option<u32> {
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        if !params.contains(r#"rel="next""#) {
            return None;
        }
        let url = target.trim().trim_start_matches('<').trim_end_matches('>');
        let (_, query) = url.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            if name == "page" {
                value.parse().ok()
            } else {
                None
            }
        })
    })
}
