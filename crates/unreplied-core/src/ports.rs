use async_trait::async_trait;

use crate::{digest::Digest, domain::Message, settings::Settings, Result};

/// Source of channel history (the platform's history endpoint).
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch messages in `settings.monitored_channel` newer than `oldest` (Unix seconds).
    async fn fetch_history(&self, settings: &Settings, oldest: i64) -> Result<Vec<Message>>;
}

/// Destination the digest is posted to.
#[async_trait]
pub trait DigestSink: Send + Sync {
    /// Post the digest to `settings.send_to`; returns the HTTP status code.
    async fn post_digest(&self, settings: &Settings, digest: &Digest) -> Result<u16>;
}
