//! Shared value types for the stale-issue report domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants and participate in domain computations.
//! Issues are transient: fetched fresh each run, never persisted, never mutated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{IssueNumber, Login};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the calendar time elapsed from `earlier` to `self`.
    ///
    /// Negative when `earlier` lies in the future.
    pub fn elapsed_since(self, earlier: Timestamp) -> Duration {
        self.0 - earlier.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------

/// How long an issue may go without an update before it is considered stale.
///
/// Measured in calendar time. The boundary is inclusive on the stale side: an
/// issue updated exactly one window ago is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessWindow(Duration);

impl StalenessWindow {
    /// Default window length in days.
    pub const DEFAULT_DAYS: i64 = 7;

    /// Creates a window of `days` calendar days.
    ///
    /// Returns `None` if `days` is not strictly positive.
    #[must_use]
    pub fn days(days: i64) -> Option<Self> {
        if days > 0 {
            Some(Self(Duration::days(days)))
        } else {
            None
        }
    }

    /// Returns the window as a [`Duration`].
    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// Returns `true` if an item last updated at `updated_at` is stale at `now`.
    pub fn is_stale(self, updated_at: Timestamp, now: Timestamp) -> bool {
        now.elapsed_since(updated_at) >= self.0
    }
}

impl Default for StalenessWindow {
    fn default() -> Self {
        Self(Duration::days(Self::DEFAULT_DAYS))
    }
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// An item returned by the tracker search.
///
/// The search may return pull requests even when asked for issues only, so the
/// flag is carried through and filtered explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker-assigned issue number.
    pub number: IssueNumber,

    /// Full, untruncated title.
    pub title: String,

    /// When the tracker last recorded activity on the item.
    pub updated_at: Timestamp,

    /// Assignee logins in tracker order. May be empty.
    pub assignees: Vec<Login>,

    /// `true` when the item is actually a pull request.
    pub is_pull_request: bool,
}

/// One page of tracker search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    /// Matching items in tracker order.
    pub issues: Vec<Issue>,

    /// Total number of matches the tracker reported, across all pages.
    pub total_count: u64,
}

impl SearchPage {
    /// Returns `true` if the tracker reported more matches than this page holds.
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.issues.len() as u64
    }

    /// Number of matches that were not returned on this page.
    pub fn omitted(&self) -> u64 {
        self.total_count.saturating_sub(self.issues.len() as u64)
    }
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// Outcome of a single organization membership lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// The tracker confirmed the login belongs to the organization.
    Member,
    /// The tracker confirmed the login does not belong to the organization.
    NotMember,
    /// The lookup failed; membership could not be confirmed.
    Unknown,
}

impl Membership {
    /// Returns `true` only for a confirmed member. `Unknown` is never a member.
    pub fn is_confirmed_member(self) -> bool {
        matches!(self, Membership::Member)
    }
}

/// An assignee login paired with its resolved membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignee {
    pub login: Login,
    pub membership: Membership,
}

/// A stale issue whose assignees have all been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIssue {
    pub issue: Issue,

    /// One entry per assignee, in the issue's assignee order.
    pub assignees: Vec<ResolvedAssignee>,
}

impl ResolvedIssue {
    /// Logins confirmed as organization members, in assignee order.
    pub fn members(&self) -> impl Iterator<Item = &Login> {
        self.assignees
            .iter()
            .filter(|a| a.membership.is_confirmed_member())
            .map(|a| &a.login)
    }

    /// Number of lookups that ended as [`Membership::Unknown`].
    pub fn unknown_count(&self) -> usize {
        self.assignees
            .iter()
            .filter(|a| a.membership == Membership::Unknown)
            .count()
    }
}
