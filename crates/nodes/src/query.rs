//! Issue query stage.

use pipeline::{Issue, IssueSearch, QueryError, SearchQuery};
use tracing::{info, warn};

/// Runs the candidate search and returns the first page of results.
///
/// When the tracker reports more matches than one page holds, the remainder is
/// not fetched; a warning records how many were left out.
pub async fn fetch_candidates(
    search: &dyn IssueSearch,
    query: &SearchQuery,
) -> Result<Vec<Issue>, QueryError> {
    let page = search.search_issues(query).await?;

    if page.is_truncated() {
        warn!(
            repository = %query.repository(),
            total_count = page.total_count,
            returned = page.issues.len(),
            omitted = page.omitted(),
            "Issue search matched more than one page; only the first page is reported"
        );
    }
    info!(
        repository = %query.repository(),
        returned = page.issues.len(),
        "Fetched stale-issue candidates"
    );

    Ok(page.issues)
}
