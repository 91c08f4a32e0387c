//! Assignee resolver.
//!
//! Fans out one membership lookup per (issue, assignee) pair with bounded
//! parallelism, then fans the results back in by slot. A lookup that fails or
//! times out degrades to [`Membership::Unknown`] for that assignee only; the
//! resolver itself never fails.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use pipeline::{
    Issue, IssueNumber, Login, Membership, MembershipDirectory, MembershipLookupError,
    OrganizationId, ResolvedAssignee, ResolvedIssue,
};
use tracing::{debug, warn};

/// Default number of membership lookups in flight at once.
pub const DEFAULT_LOOKUP_CONCURRENCY: usize = 8;

/// Resolves assignee logins to organization membership.
pub struct AssigneeResolver {
    directory: Arc<dyn MembershipDirectory>,
    concurrency: NonZeroUsize,
    lookup_timeout: Option<Duration>,
}

impl AssigneeResolver {
    /// Creates a resolver with [`DEFAULT_LOOKUP_CONCURRENCY`] and no per-lookup timeout.
    pub fn new(directory: Arc<dyn MembershipDirectory>) -> Self {
        Self {
            directory,
            concurrency: NonZeroUsize::new(DEFAULT_LOOKUP_CONCURRENCY)
                .unwrap_or(NonZeroUsize::MIN),
            lookup_timeout: None,
        }
    }

    /// Caps the number of lookups in flight at once.
    pub fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Bounds each lookup; a lookup exceeding `timeout` resolves as unknown.
    pub fn with_lookup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Resolves every assignee of every issue against `organization`.
    ///
    /// Output order matches `issues`, and each issue's assignees keep their
    /// original order regardless of the order lookups complete in.
    pub async fn resolve(
        &self,
        organization: &OrganizationId,
        issues: Vec<Issue>,
    ) -> Vec<ResolvedIssue> {
        let lookups: Vec<(usize, usize, IssueNumber, Login)> = issues
            .iter()
            .enumerate()
            .flat_map(|(issue_slot, issue)| {
                issue
                    .assignees
                    .iter()
                    .enumerate()
                    .map(move |(assignee_slot, login)| {
                        (issue_slot, assignee_slot, issue.number, login.clone())
                    })
            })
            .collect();

        debug!(
            organization = %organization,
            lookups = lookups.len(),
            concurrency = self.concurrency.get(),
            "Resolving assignee membership"
        );

        let outcomes: Vec<(usize, usize, Membership)> = stream::iter(lookups)
            .map(|(issue_slot, assignee_slot, number, login)| async move {
                let membership = self.lookup(organization, number, &login).await;
                (issue_slot, assignee_slot, membership)
            })
            .buffer_unordered(self.concurrency.get())
            .collect()
            .await;

        let mut slots: Vec<Vec<Membership>> = issues
            .iter()
            .map(|issue| vec![Membership::Unknown; issue.assignees.len()])
            .collect();
        for (issue_slot, assignee_slot, membership) in outcomes {
            slots[issue_slot][assignee_slot] = membership;
        }

        issues
            .into_iter()
            .zip(slots)
            .map(|(issue, memberships)| {
                let assignees = issue
                    .assignees
                    .iter()
                    .cloned()
                    .zip(memberships)
                    .map(|(login, membership)| ResolvedAssignee { login, membership })
                    .collect();
                ResolvedIssue { issue, assignees }
            })
            .collect()
    }

    async fn lookup(
        &self,
        organization: &OrganizationId,
        issue: IssueNumber,
        login: &Login,
    ) -> Membership {
        let outcome = match self.lookup_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.directory.is_member(organization, login))
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => Err(MembershipLookupError::TimedOut {
                        seconds: limit.as_secs(),
                    }),
                }
            }
            None => self.directory.is_member(organization, login).await,
        };

        match outcome {
            Ok(true) => Membership::Member,
            Ok(false) => Membership::NotMember,
            Err(error) => {
                warn!(
                    issue = %issue,
                    login = %login,
                    error = %error,
                    "Membership could not be confirmed; assignee will not be mentioned"
                );
                Membership::Unknown
            }
        }
    }
}
