//! JSON settings file naming the endpoints and channels.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{errors::Error, Result};

/// Endpoint and channel settings, loaded once per run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// History endpoint queried for messages.
    #[serde(rename = "slackApiURL")]
    pub slack_api_url: String,
    /// Endpoint the digest is posted to.
    #[serde(rename = "postMessage")]
    pub post_message_url: String,
    #[serde(rename = "monitoredChannel")]
    pub monitored_channel: String,
    #[serde(rename = "sendTo")]
    pub send_to: String,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &raw)
    }

    fn parse(path: &Path, raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
