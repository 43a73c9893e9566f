use std::fmt;

use serde::{Deserialize, Deserializer};

/// Bearer credential for the chat API.
///
/// Threaded explicitly into the adapter; `Debug` never prints the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Token(<empty>)")
        } else {
            f.write_str("Token(<redacted>)")
        }
    }
}

/// A channel history message, as returned by the platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reply_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Author id; kept for completeness, not used by the digest.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
}

impl Message {
    pub fn new(reply_count: u32, text: impl Into<String>) -> Self {
        Self {
            reply_count,
            text: text.into(),
            user: String::new(),
        }
    }
}

/// Decode `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// What a single run ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    NoMessages,
    Posted { count: usize, status: u16 },
}
