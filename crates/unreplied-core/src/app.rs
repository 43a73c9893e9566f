//! One fetch → filter → post run.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    config::RunSettings,
    digest::Digest,
    domain::RunOutcome,
    errors::{Error, RunError},
    filter::filter_unanswered,
    ports::{DigestSink, HistorySource},
};

/// Start of the lookback window as Unix seconds.
pub fn oldest_timestamp(now: DateTime<Utc>, lookback: Duration) -> Result<i64, Error> {
    let window = chrono::Duration::from_std(lookback)
        .map_err(|e| Error::Config(format!("lookback window out of range: {e}")))?;
    now.checked_sub_signed(window)
        .map(|t| t.timestamp())
        .ok_or_else(|| Error::Config("lookback window out of range".to_string()))
}

/// Fetch the history, keep unanswered messages and post a digest if any remain.
///
/// The sink is never called when nothing qualifies.
pub async fn run(
    settings: &RunSettings,
    lookback: Duration,
    now: DateTime<Utc>,
    source: &dyn HistorySource,
    sink: &dyn DigestSink,
) -> Result<RunOutcome, RunError> {
    let oldest = oldest_timestamp(now, lookback).map_err(RunError::Fetch)?;
    info!(
        channel = %settings.fetch.monitored_channel,
        oldest,
        "fetching channel history"
    );

    let messages = source
        .fetch_history(&settings.fetch, oldest)
        .await
        .map_err(RunError::Fetch)?;

    let lines = filter_unanswered(&messages);
    info!(
        fetched = messages.len(),
        unanswered = lines.len(),
        "filtered history"
    );

    if lines.is_empty() {
        info!("no messages");
        return Ok(RunOutcome::NoMessages);
    }

    let digest = Digest::build(&lines);
    let status = sink
        .post_digest(&settings.post, &digest)
        .await
        .map_err(RunError::Post)?;

    Ok(RunOutcome::Posted {
        count: digest.line_count(),
        status,
    })
}
