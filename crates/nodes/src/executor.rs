//! Run executor: Query → Filter → Resolve → Format → Dispatch, once.

use std::sync::Arc;

use pipeline::{
    filter_stale, FallbackMention, IssueSearch, OrganizationId, Report, ReportJobError,
    ReportRunId, RepositoryId, SearchQuery, StalenessWindow, Timestamp,
};
use tracing::{error, info, info_span, Instrument};

use crate::{fetch_candidates, AssigneeResolver, NotificationDispatcher, RunOutcome};

/// Fixed inputs of a report run.
#[derive(Debug, Clone)]
pub struct ReportJobSettings {
    pub repository: RepositoryId,
    pub organization: OrganizationId,
    pub fallback: FallbackMention,
    pub window: StalenessWindow,
}

/// Counters describing a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: ReportRunId,
    /// Items returned by the tracker search.
    pub fetched: usize,
    /// Items that survived the staleness filter.
    pub stale: usize,
    /// Membership lookups that ended unknown.
    pub unknown_lookups: usize,
    pub outcome: RunOutcome,
}

/// A single stale-issue report run.
///
/// Holds no state between runs; every call to [`ReportJob::run`] starts from a
/// fresh search.
pub struct ReportJob {
    search: Arc<dyn IssueSearch>,
    resolver: AssigneeResolver,
    dispatcher: NotificationDispatcher,
    settings: ReportJobSettings,
}

impl ReportJob {
    pub fn new(
        search: Arc<dyn IssueSearch>,
        resolver: AssigneeResolver,
        dispatcher: NotificationDispatcher,
        settings: ReportJobSettings,
    ) -> Self {
        Self {
            search,
            resolver,
            dispatcher,
            settings,
        }
    }

    /// Executes every stage in sequence, using `now` as the staleness reference.
    ///
    /// # Errors
    ///
    /// [`ReportJobError::Query`] if the search fails (nothing is built or sent);
    /// [`ReportJobError::Dispatch`] if the built report could not be delivered.
    pub async fn run(&self, now: Timestamp) -> Result<RunSummary, ReportJobError> {
        let run_id = ReportRunId::new_random();
        let span = info_span!(
            "report_run",
            run_id = %run_id,
            repository = %self.settings.repository,
            now = %now,
        );
        self.run_stages(run_id, now).instrument(span).await
    }

    async fn run_stages(
        &self,
        run_id: ReportRunId,
        now: Timestamp,
    ) -> Result<RunSummary, ReportJobError> {
        let query = SearchQuery::stale_candidates(self.settings.repository.clone());
        let candidates = fetch_candidates(self.search.as_ref(), &query)
            .await
            .inspect_err(|e| error!(error = %e, "Issue search failed; no report produced"))?;
        let fetched = candidates.len();

        let stale = filter_stale(candidates, now, self.settings.window);
        info!(fetched, stale = stale.len(), "Applied staleness filter");

        let resolved = self
            .resolver
            .resolve(&self.settings.organization, stale)
            .await;
        let unknown_lookups = resolved.iter().map(|r| r.unknown_count()).sum();

        let report = Report::build(&resolved, &self.settings.fallback);
        let outcome = self
            .dispatcher
            .dispatch(report.as_ref())
            .await
            .inspect_err(|e| error!(error = %e, "Stale issue report could not be delivered"))?;

        Ok(RunSummary {
            run_id,
            fetched,
            stale: resolved.len(),
            unknown_lookups,
            outcome,
        })
    }
}
