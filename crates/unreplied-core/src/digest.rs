//! Digest text posted to the destination channel.

/// Fixed banner opening every digest.
pub const HEADER: &str = "*<Automated notice>  There are questions without replies* \n";

/// Lines longer than this (in chars) are truncated.
pub const MAX_LINE_CHARS: usize = 50;

/// Number of chars kept from a truncated line, prefix included.
pub const KEEP_CHARS: usize = 55;

pub const ELISION: &str = "...(truncated)";

/// A rendered digest ready to be posted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digest {
    text: String,
    lines: usize,
}

impl Digest {
    /// Render the header plus one line per entry, truncating long entries.
    pub fn build(lines: &[String]) -> Self {
        let mut text = String::from(HEADER);
        for (i, line) in lines.iter().enumerate() {
            text.push_str(&render_line(i + 1, line));
            text.push('\n');
        }
        Self {
            text,
            lines: lines.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }
}

/// Render one digest line; `ordinal` is 1-based.
///
/// The kept slice is taken from the already-prefixed line, so the leading
/// `" > "` counts toward [`KEEP_CHARS`].
pub fn render_line(ordinal: usize, line: &str) -> String {
    if line.chars().count() <= MAX_LINE_CHARS {
        return line.to_string();
    }
    let kept: String = line.chars().take(KEEP_CHARS).collect();
    format!("({ordinal}) > {kept}{ELISION}")
}
