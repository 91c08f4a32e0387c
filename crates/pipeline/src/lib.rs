//! Core domain for the stale-issue report job.
//!
//! This crate contains every domain concept, newtype identifier, value type,
//! error type and decision rule used by the job: which search to run, which
//! results count as stale, how a row is built, and how the message reads.
//! Infrastructure crates implement the traits defined here; they never add
//! domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `RepositoryId`, `Login`, etc.) |
//! | [`types`] | Value types (`Issue`, `Membership`, `StalenessWindow`, etc.) |
//! | [`errors`] | Query, lookup, dispatch and run-level errors |
//! | [`ports`] | Traits implemented by the `github` and `chat` adapters |
//! | [`query`] | The candidate search expression |
//! | [`staleness`] | Pull-request and recency filter |
//! | [`report`] | Row construction, truncation and message rendering |

pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod query;
pub mod report;
pub mod staleness;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{DispatchError, MembershipLookupError, QueryError, ReportJobError};
pub use identifiers::{
    ChannelId, FallbackMention, IssueNumber, Login, OrganizationId, ReportRunId, RepositoryId,
};
pub use ports::{ChatNotifier, IssueSearch, MembershipDirectory};
pub use query::{SearchQuery, SEARCH_PAGE_SIZE};
pub use report::{truncate_title, Report, ReportRow, MAX_TITLE_CHARS};
pub use staleness::filter_stale;
pub use types::{
    Issue, Membership, ResolvedAssignee, ResolvedIssue, SearchPage, StalenessWindow, Timestamp,
};
