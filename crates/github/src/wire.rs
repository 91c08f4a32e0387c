//! GitHub REST response shapes.
//!
//! Only the fields the report needs are decoded; everything else is ignored.

use chrono::{DateTime, Utc};
use pipeline::{Issue, IssueNumber, Login, SearchPage, Timestamp};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchIssuesResponse {
    pub(crate) total_count: u64,
    #[serde(default)]
    pub(crate) incomplete_results: bool,
    #[serde(default)]
    pub(crate) items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    number: u64,
    title: String,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    assignees: Vec<Account>,
    /// Present (as an object of links) only when the item is a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
}

impl From<SearchItem> for Issue {
    fn from(item: SearchItem) -> Self {
        Issue {
            number: IssueNumber::new(item.number),
            title: item.title,
            updated_at: Timestamp::from_utc(item.updated_at),
            assignees: item
                .assignees
                .into_iter()
                .filter_map(|account| Login::new(account.login))
                .collect(),
            is_pull_request: item.pull_request.is_some(),
        }
    }
}

impl From<SearchIssuesResponse> for SearchPage {
    fn from(response: SearchIssuesResponse) -> Self {
        SearchPage {
            issues: response.items.into_iter().map(Issue::from).collect(),
            total_count: response.total_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: Option<String>,
}
