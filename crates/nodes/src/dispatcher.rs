//! Notification dispatcher.

use std::sync::Arc;

use pipeline::{ChannelId, ChatNotifier, DispatchError, Report, RepositoryId};
use tracing::info;

/// What the dispatcher did with a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// One message carrying `rows` table rows was accepted by the chat endpoint.
    Delivered { rows: usize },
    /// No stale issues; no network call was made.
    NothingToReport,
}

/// Renders a report and delivers it as a single chat message.
pub struct NotificationDispatcher {
    notifier: Arc<dyn ChatNotifier>,
    channel: ChannelId,
    repository: RepositoryId,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn ChatNotifier>, channel: ChannelId, repository: RepositoryId) -> Self {
        Self {
            notifier,
            channel,
            repository,
        }
    }

    /// Delivers `report`, or does nothing when there is no report.
    ///
    /// Exactly one delivery attempt is made per call; failures are returned,
    /// never retried.
    pub async fn dispatch(&self, report: Option<&Report>) -> Result<RunOutcome, DispatchError> {
        let Some(report) = report else {
            info!(repository = %self.repository, "No stale issues found; nothing to report");
            return Ok(RunOutcome::NothingToReport);
        };

        let text = report.render_message(&self.repository);
        self.notifier.post_message(&self.channel, &text).await?;

        info!(
            repository = %self.repository,
            channel = %self.channel,
            rows = report.len(),
            "Stale issue report delivered"
        );
        Ok(RunOutcome::Delivered { rows: report.len() })
    }
}
