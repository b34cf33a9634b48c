//! Transcript entry types.

use serde::{Deserialize, Serialize};

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Answer returned by the backend.
    Bot,
}

/// A single entry in the chat transcript.
///
/// Serialized as `{"sender": "user" | "bot", "text": "..."}`, the shape stored
/// under the `chatHistory` cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_shape() {
        let json = serde_json::to_string(&ChatEntry::user("hello")).unwrap();
        assert_eq!(json, r#"{"sender":"user","text":"hello"}"#);

        let entry: ChatEntry = serde_json::from_str(r#"{"sender":"bot","text":"hi"}"#).unwrap();
        assert_eq!(entry, ChatEntry::bot("hi"));
    }
}
