//! Unanswered-message selection.

use crate::domain::Message;

/// Marker prepended to every selected message.
pub const LINE_PREFIX: &str = " > ";

/// Keep messages with no replies and non-empty text, formatted as digest lines.
///
/// Input order is preserved; duplicates are kept.
pub fn filter_unanswered(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter(|m| is_unanswered(m))
        .map(|m| format!("{LINE_PREFIX}{}", m.text))
        .collect()
}

pub fn is_unanswered(message: &Message) -> bool {
    message.reply_count == 0 && !message.text.is_empty()
}
