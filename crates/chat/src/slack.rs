use std::time::Duration;

use async_trait::async_trait;
use pipeline::{ChannelId, ChatNotifier, DispatchError};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default Web API root.
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

const USER_AGENT: &str = "stale-issues-report";

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// Posts messages with a bot token to `{api_base}/chat.postMessage`.
#[derive(Clone)]
pub struct SlackNotifier {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl std::fmt::Debug for SlackNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackNotifier")
            .field("api_base", &self.api_base)
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

impl SlackNotifier {
    pub fn new(
        api_base: &str,
        bot_token: &str,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.trim().to_string(),
        })
    }

    fn authorization(&self) -> Result<HeaderValue, DispatchError> {
        if self.bot_token.is_empty() {
            return Err(DispatchError::InvalidCredentials);
        }
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.bot_token))
            .map_err(|_| DispatchError::InvalidCredentials)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl ChatNotifier for SlackNotifier {
    #[instrument(skip_all, fields(channel = %channel, bytes = text.len()))]
    async fn post_message(&self, channel: &ChannelId, text: &str) -> Result<(), DispatchError> {
        let authorization = self.authorization()?;
        let response = self
            .http
            .post(format!("{}/chat.postMessage", self.api_base))
            .header(AUTHORIZATION, authorization)
            .json(&PostMessageRequest {
                channel: channel.as_str(),
                text,
            })
            .send()
            .await
            .map_err(|e| DispatchError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status {
                status: status.as_u16(),
            });
        }

        // Plain-text or empty 2xx bodies count as delivered.
        let body = response.text().await.unwrap_or_default();
        if let Ok(parsed) = serde_json::from_str::<PostMessageResponse>(&body) {
            if !parsed.ok {
                return Err(DispatchError::Rejected {
                    reason: parsed.error.unwrap_or_else(|| "unknown error".to_string()),
                });
            }
        }

        debug!(status = status.as_u16(), "Chat endpoint accepted message");
        Ok(())
    }
}
