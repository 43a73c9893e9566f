use std::path::PathBuf;

/// Core error type.
///
/// Adapter crates map their transport errors into this type so the binary can
/// report every failure the same way.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("settings error: {path}: {reason}")]
    Settings { path: PathBuf, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A failure in one step of a run, tagged with the step for reporting.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Error getting messages: {0}")]
    Fetch(#[source] Error),

    #[error("Error posting message: {0}")]
    Post(#[source] Error),
}
