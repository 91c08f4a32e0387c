//! Chat webhook adapter for the stale-issue report.
//!
//! Implements the [`pipeline::ChatNotifier`] trait over a Slack-compatible
//! `chat.postMessage` endpoint: one authenticated JSON POST per message.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Request framing, credential handling and response
//! interpretation live here. The [`pipeline`] crate sees only
//! [`pipeline::ChatNotifier`].
//!
//! ## Delivery semantics
//!
//! A message counts as delivered only when the endpoint answers 2xx **and** the
//! body does not carry `"ok": false`. No retries are attempted.

mod slack;

pub use slack::{SlackNotifier, DEFAULT_API_BASE};
