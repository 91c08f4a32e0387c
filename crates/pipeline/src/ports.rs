//! Port traits implemented by infrastructure crates.
//!
//! The orchestration layer only ever sees these traits; HTTP details,
//! authentication and response decoding stay in the adapters.

use async_trait::async_trait;

use crate::{
    ChannelId, DispatchError, Login, MembershipLookupError, OrganizationId, QueryError,
    SearchQuery, SearchPage,
};

/// Executes a stale-candidate search against the issue tracker.
#[async_trait]
pub trait IssueSearch: Send + Sync {
    /// Runs `query` and returns at most one page of results in tracker order.
    async fn search_issues(&self, query: &SearchQuery) -> Result<SearchPage, QueryError>;
}

/// Answers organization membership questions.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Returns `Ok(true)` if `login` is a confirmed member of `organization`,
    /// `Ok(false)` if the tracker confirms it is not.
    async fn is_member(
        &self,
        organization: &OrganizationId,
        login: &Login,
    ) -> Result<bool, MembershipLookupError>;
}

/// Delivers one text message to a chat channel.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn post_message(&self, channel: &ChannelId, text: &str) -> Result<(), DispatchError>;
}
