use anyhow::Context;
use tracing::{error, info};

use unreplied_core::{app, config::Config, domain::RunOutcome};
use unreplied_slack::SlackClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    unreplied_core::logging::init("unreplied").context("initializing logging")?;

    // Failures below are reported as log lines; the process still exits normally.
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Error loading config: {e}");
            return Ok(());
        }
    };

    let settings = match cfg.load_settings() {
        Ok(s) => s,
        Err(e) => {
            error!("Error loading settings: {e}");
            return Ok(());
        }
    };

    let client = match SlackClient::new(cfg.token.clone(), cfg.http_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Error creating http client: {e}");
            return Ok(());
        }
    };

    match app::run(&settings, cfg.lookback, chrono::Utc::now(), &client, &client).await {
        Ok(RunOutcome::Posted { count, status }) => {
            info!(count, status, "digest posted");
        }
        Ok(RunOutcome::NoMessages) => {}
        Err(e) => error!("{e}"),
    }

    Ok(())
}
