//! Slack Web API adapter: `conversations.history` in, form-encoded post out.
//!
//! Endpoint URLs come from [`Settings`], so the same client works against any
//! server speaking the same shapes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use unreplied_core::{
    digest::Digest,
    domain::{Message, Token},
    errors::Error,
    ports::{DigestSink, HistorySource},
    settings::Settings,
    Result,
};

/// Body of a history response. Only `messages` matters; `ok`/`error` are logged.
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Option<Vec<Message>>,
}

#[derive(Clone, Debug)]
pub struct SlackClient {
    token: Token,
    http: Client,
}

impl SlackClient {
    pub fn new(token: Token, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Http(format!("http client build failed: {e}")))?;
        Ok(Self { token, http })
    }

    /// GET the history endpoint with a bearer header.
    ///
    /// The status code is not checked: any body that decodes is accepted.
    pub async fn fetch_history(&self, settings: &Settings, oldest: i64) -> Result<Vec<Message>> {
        let oldest = oldest.to_string();
        let resp = self
            .http
            .get(&settings.slack_api_url)
            .query(&[
                ("channel", settings.monitored_channel.as_str()),
                ("oldest", oldest.as_str()),
            ])
            .bearer_auth(self.token.as_str())
            .send()
            .await
            .map_err(|e| Error::Http(format!("history request failed: {}", e.without_url())))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("history body read failed: {}", e.without_url())))?;

        let parsed: HistoryResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!(status = status.as_u16(), "history response did not decode");
            Error::Json(e)
        })?;

        if parsed.ok == Some(false) {
            let err = parsed.error.as_deref().unwrap_or("unknown error");
            warn!(error = %err, status = status.as_u16(), "history endpoint reported failure");
        }

        Ok(parsed.messages.unwrap_or_default())
    }

    /// POST the digest form-encoded; the token travels as a form field.
    pub async fn post_digest(&self, settings: &Settings, text: &str) -> Result<u16> {
        let form = [
            ("token", self.token.as_str()),
            ("channel", settings.send_to.as_str()),
            ("text", text),
        ];

        let resp = self
            .http
            .post(&settings.post_message_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Http(format!("post request failed: {}", e.without_url())))?;

        let status = resp.status().as_u16();
        info!(status, "Message sent");
        Ok(status)
    }
}

#[async_trait]
impl HistorySource for SlackClient {
    async fn fetch_history(&self, settings: &Settings, oldest: i64) -> Result<Vec<Message>> {
        SlackClient::fetch_history(self, settings, oldest).await
    }
}

#[async_trait]
impl DigestSink for SlackClient {
    async fn post_digest(&self, settings: &Settings, digest: &Digest) -> Result<u16> {
        SlackClient::post_digest(self, settings, digest.text()).await
    }
}
