//! Authenticated GitHub REST client.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{
    IssueSearch, Login, MembershipDirectory, MembershipLookupError, OrganizationId, QueryError,
    SearchPage, SearchQuery,
};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::wire::{ErrorBody, SearchIssuesResponse};

/// Default REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = "stale-issues-report";
const API_VERSION: &str = "2022-11-28";
const MAX_ERROR_CHARS: usize = 200;

/// The client could not be constructed.
#[derive(Debug, Error)]
pub enum GithubClientError {
    #[error("GitHub token cannot be used as an authorization header")]
    InvalidToken,

    #[error("Failed to build GitHub HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// GitHub REST client implementing [`IssueSearch`] and [`MembershipDirectory`].
///
/// Every request carries the bearer token, the JSON media type and a pinned
/// API version. Redirects are followed, which lets membership checks made by
/// non-members resolve through the public-members endpoint.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubClient {
    pub fn new(
        api_base: &str,
        token: &str,
        request_timeout: Duration,
    ) -> Result<Self, GithubClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static(API_VERSION),
        );
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| GithubClientError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IssueSearch for GithubClient {
    #[instrument(skip_all, fields(repository = %query.repository()))]
    async fn search_issues(&self, query: &SearchQuery) -> Result<SearchPage, QueryError> {
        let expression = query.expression();
        let per_page = query.page_size().to_string();
        debug!(q = %expression, "Searching issues");

        let response = self
            .http
            .get(format!("{}/search/issues", self.api_base))
            .query(&[("q", expression.as_str()), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| QueryError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(QueryError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: SearchIssuesResponse =
            response
                .json()
                .await
                .map_err(|e| QueryError::MalformedResponse {
                    message: e.to_string(),
                })?;
        if body.incomplete_results {
            warn!("GitHub reported incomplete search results");
        }

        Ok(SearchPage::from(body))
    }
}

#[async_trait]
impl MembershipDirectory for GithubClient {
    #[instrument(skip_all, fields(organization = %organization, login = %login))]
    async fn is_member(
        &self,
        organization: &OrganizationId,
        login: &Login,
    ) -> Result<bool, MembershipLookupError> {
        let response = self
            .http
            .get(format!(
                "{}/orgs/{}/members/{}",
                self.api_base, organization, login
            ))
            .send()
            .await
            .map_err(|e| MembershipLookupError::Transport {
                message: e.to_string(),
            })?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(MembershipLookupError::UnexpectedStatus {
                status: other.as_u16(),
            }),
        }
    }
}

/// Extracts GitHub's `message` field from an error body, falling back to the
/// raw text. Either way the result is bounded for logging.
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.trim().to_string());
    if message.chars().count() <= MAX_ERROR_CHARS {
        message
    } else {
        let mut cut: String = message.chars().take(MAX_ERROR_CHARS).collect();
        cut.push('…');
        cut
    }
}
