//! Search expression for stale-issue candidates.

use crate::RepositoryId;

/// Maximum number of results requested from the tracker.
///
/// Only the first page is considered. Repositories with more matching issues
/// than this are reported on partially and the omission is logged.
pub const SEARCH_PAGE_SIZE: u8 = 100;

/// A tracker search selecting open issues with at least one comment and no
/// milestone in a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    repository: RepositoryId,
    page_size: u8,
}

impl SearchQuery {
    /// Builds the candidate query for `repository` with the default page size.
    pub fn stale_candidates(repository: RepositoryId) -> Self {
        Self {
            repository,
            page_size: SEARCH_PAGE_SIZE,
        }
    }

    pub fn repository(&self) -> &RepositoryId {
        &self.repository
    }

    pub fn page_size(&self) -> u8 {
        self.page_size
    }

    /// The search expression sent to the tracker.
    pub fn expression(&self) -> String {
        format!(
            "repo:{} is:issue is:open comments:>=1 no:milestone",
            self.repository
        )
    }
}
