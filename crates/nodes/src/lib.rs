//! Stale-issue report stages and run executor.
//!
//! This crate provides the stages of a report run (issue query, assignee
//! resolution, notification dispatch) and the [`ReportJob`] executor that
//! sequences them with the pure filter and formatter from [`pipeline`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Stages sequence calls between business logic in the
//! [`pipeline`] crate and infrastructure traits (issue search, membership
//! directory, chat notifier). They contain no domain rules of their own.

mod dispatcher;
mod executor;
mod query;
mod resolver;

pub use dispatcher::{NotificationDispatcher, RunOutcome};
pub use executor::{ReportJob, ReportJobSettings, RunSummary};
pub use query::fetch_candidates;
pub use resolver::{AssigneeResolver, DEFAULT_LOOKUP_CONCURRENCY};
