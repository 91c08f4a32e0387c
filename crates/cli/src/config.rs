//! Ambient configuration.
//!
//! Every option is bound to an environment variable so a scheduler can invoke
//! the binary with no arguments. Missing required values abort the process
//! before any network call.

use std::num::NonZeroUsize;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use pipeline::{ChannelId, FallbackMention, OrganizationId, RepositoryId, StalenessWindow};
use thiserror::Error;

/// Log output encoding on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Command-line / environment surface.
#[derive(Debug, Parser)]
#[command(
    name = "stale-issues",
    version,
    args_override_self = true,
    about = "Posts a report of stale issues in a GitHub repository to a chat channel"
)]
pub struct Cli {
    /// Repository to inspect, as `owner/name`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Token used for issue search and membership lookups.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Organization whose members are mentioned. Defaults to the repository owner.
    #[arg(long, env = "GITHUB_ORG")]
    pub organization: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = github::DEFAULT_API_BASE)]
    pub github_api_url: String,

    /// Bot token for the chat endpoint.
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub slack_bot_token: String,

    /// Channel the report is posted to.
    #[arg(long, env = "SLACK_CHANNEL_ID")]
    pub slack_channel_id: String,

    #[arg(long, env = "SLACK_API_URL", default_value = chat::DEFAULT_API_BASE)]
    pub slack_api_url: String,

    /// Mention used when no assignee is a confirmed organization member.
    #[arg(long, env = "STALE_FALLBACK_MENTION", default_value = "@here")]
    pub fallback_mention: String,

    /// Membership lookups in flight at once.
    #[arg(long, env = "STALE_LOOKUP_CONCURRENCY", default_value_t = nodes::DEFAULT_LOOKUP_CONCURRENCY)]
    pub lookup_concurrency: usize,

    /// Per-lookup timeout in seconds; 0 disables it.
    #[arg(long, env = "STALE_LOOKUP_TIMEOUT_SECS", default_value_t = 10)]
    pub lookup_timeout_secs: u64,

    /// Timeout applied to every HTTP request, in seconds.
    #[arg(long, env = "STALE_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    #[arg(long, env = "STALE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; span export is disabled when unset.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

/// A configuration value that parsed but is not usable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Repository must be in `owner/name` form, got {0:?}")]
    InvalidRepository(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("Lookup concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("HTTP timeout must be at least 1 second")]
    ZeroHttpTimeout,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub repository: RepositoryId,
    pub organization: OrganizationId,
    pub github_token: String,
    pub github_api_url: String,
    pub slack_bot_token: String,
    pub slack_channel: ChannelId,
    pub slack_api_url: String,
    pub fallback: FallbackMention,
    pub window: StalenessWindow,
    pub lookup_concurrency: NonZeroUsize,
    pub lookup_timeout: Option<Duration>,
    pub http_timeout: Duration,
}

impl Cli {
    /// Validates the raw values.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let repository = RepositoryId::new(&self.repository)
            .ok_or_else(|| ConfigError::InvalidRepository(self.repository.clone()))?;
        let organization = match &self.organization {
            Some(org) => OrganizationId::new(org.as_str()).ok_or(ConfigError::Empty("GITHUB_ORG"))?,
            None => OrganizationId::from(&repository),
        };
        if self.github_token.trim().is_empty() {
            return Err(ConfigError::Empty("GITHUB_TOKEN"));
        }
        if self.slack_bot_token.trim().is_empty() {
            return Err(ConfigError::Empty("SLACK_BOT_TOKEN"));
        }
        let slack_channel = ChannelId::new(self.slack_channel_id.as_str())
            .ok_or(ConfigError::Empty("SLACK_CHANNEL_ID"))?;
        let fallback = FallbackMention::new(self.fallback_mention.as_str())
            .ok_or(ConfigError::Empty("STALE_FALLBACK_MENTION"))?;
        let lookup_concurrency =
            NonZeroUsize::new(self.lookup_concurrency).ok_or(ConfigError::ZeroConcurrency)?;
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroHttpTimeout);
        }

        Ok(Config {
            repository,
            organization,
            github_token: self.github_token.clone(),
            github_api_url: self.github_api_url.clone(),
            slack_bot_token: self.slack_bot_token.clone(),
            slack_channel,
            slack_api_url: self.slack_api_url.clone(),
            fallback,
            window: StalenessWindow::default(),
            lookup_concurrency,
            lookup_timeout: (self.lookup_timeout_secs > 0)
                .then(|| Duration::from_secs(self.lookup_timeout_secs)),
            http_timeout: Duration::from_secs(self.http_timeout_secs),
        })
    }
}
