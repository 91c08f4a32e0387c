//! GitHub infrastructure adapter for the stale-issue report.
//!
//! Implements the tracker-facing traits defined in the [`pipeline`] crate
//! (`IssueSearch`, `MembershipDirectory`) over the GitHub REST API using
//! `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All GitHub API
//! details (authentication headers, status-code semantics, response decoding)
//! are handled here; the [`pipeline`] crate never sees them.
//!
//! ## Endpoints
//!
//! | Trait method | Endpoint | Outcome mapping |
//! |--------------|----------|-----------------|
//! | `search_issues` | `GET /search/issues?q=…&per_page=100` | 401/403 → `Unauthorized`, other non-2xx → `Rejected` |
//! | `is_member` | `GET /orgs/{org}/members/{login}` | 204 → member, 404 → not member, other → lookup error |

mod client;
mod wire;

pub use client::{GithubClient, GithubClientError, DEFAULT_API_BASE};

#[cfg(test)]
mod tests;
