//! Error types for the stale-issue report domain.
//!
//! | Error | Severity | Handling |
//! |-------|----------|----------|
//! | [`QueryError`] | fatal | propagates to the run's top level; no report is produced |
//! | [`MembershipLookupError`] | recovered | downgraded to [`crate::Membership::Unknown`] for one assignee |
//! | [`DispatchError`] | fatal | propagates to the run's top level; nothing was posted |
//!
//! An empty result is not an error: the run ends successfully without delivery.
//! No layer retries; retries belong to whatever triggers the job.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Tracker errors
// ---------------------------------------------------------------------------

/// The tracker search could not be executed.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request never produced an HTTP response (DNS, TLS, connection, timeout).
    #[error("Issue search transport failure: {message}")]
    Transport { message: String },

    /// The tracker rejected the credentials.
    #[error("Issue search was not authorised (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The tracker refused the query itself (malformed query, unknown repository).
    #[error("Issue search was rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The tracker answered successfully but the body could not be decoded.
    #[error("Issue search response could not be decoded: {message}")]
    MalformedResponse { message: String },
}

/// A single organization membership lookup could not be completed.
///
/// Never propagates past the assignee resolver.
#[derive(Debug, Error)]
pub enum MembershipLookupError {
    #[error("Membership lookup transport failure: {message}")]
    Transport { message: String },

    #[error("Membership lookup returned unexpected HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Membership lookup timed out after {seconds}s")]
    TimedOut { seconds: u64 },
}

// ---------------------------------------------------------------------------
// Chat errors
// ---------------------------------------------------------------------------

/// The report could not be delivered to the chat channel.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The bot credential could not be turned into a request header.
    #[error("Chat credentials are malformed")]
    InvalidCredentials,

    #[error("Chat delivery transport failure: {message}")]
    Transport { message: String },

    /// The webhook answered with a non-success status.
    #[error("Chat delivery failed with HTTP {status}")]
    Status { status: u16 },

    /// The webhook answered 2xx but reported that the message was not accepted.
    #[error("Chat delivery was rejected: {reason}")]
    Rejected { reason: String },
}

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that terminate a report run.
#[derive(Debug, Error)]
pub enum ReportJobError {
    /// The issue search failed before anything was built.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The report was built but could not be delivered.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
