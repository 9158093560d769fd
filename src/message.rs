//! Structured chat transcript entries for the "talk to the well" panel.
//!
//! `ChatEntry` replaces raw strings with typed messages so the TUI and the
//! one-shot `ask` command can render the same transcript, and so tests can
//! assert on structure instead of formatting.

use serde::{Deserialize, Serialize};

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatEntry {
    /// A question typed by the operator.
    User { text: String },
    /// The well's answer.
    Well { text: String },
    /// Local status line (errors, hints); never sent anywhere.
    Notice { text: String },
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    pub fn well(text: impl Into<String>) -> Self {
        Self::Well { text: text.into() }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::User { text } | Self::Well { text } | Self::Notice { text } => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let entry = ChatEntry::user("what happened in june?");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"User\""));
    }

    #[test]
    fn round_trips() {
        let entry = ChatEntry::well("Downtime spiked after the workover.");
        let json = serde_json::to_string(&entry).unwrap();
        let back: ChatEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn text_accessor() {
        assert_eq!(ChatEntry::notice("fetch failed").text(), "fetch failed");
    }
}
