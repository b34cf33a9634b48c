use serde::{Deserialize, Serialize};

use super::message::ChatEntry;

/// Greeting seeded into a transcript that has no history yet.
pub const GREETING: &str = "Hi! How can I help you?";

/// Ordered chat history. Grows only by append.
///
/// Serializes transparently as a JSON array of entries so the cached value is
/// exactly the list of `{sender, text}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript holding only the bot greeting.
    pub fn seeded() -> Self {
        Self {
            entries: vec![ChatEntry::bot(GREETING)],
        }
    }

    pub fn from_entries(entries: Vec<ChatEntry>) -> Self {
        Self { entries }
    }

    /// Appends an entry, then drops the oldest entries beyond `max_len`.
    ///
    /// `None` leaves the transcript unbounded.
    pub fn append(&mut self, entry: ChatEntry, max_len: Option<usize>) {
        self.entries.push(entry);
        if let Some(max) = max_len {
            let overflow = self.entries.len().saturating_sub(max.max(1));
            if overflow > 0 {
                self.entries.drain(..overflow);
            }
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Sender;

    #[test]
    fn test_seeded_greeting() {
        let transcript = Transcript::seeded();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0].sender, Sender::Bot);
        assert_eq!(transcript.entries()[0].text, GREETING);
    }

    #[test]
    fn test_unbounded_append_keeps_order() {
        let mut transcript = Transcript::new();
        for i in 0..5 {
            transcript.append(ChatEntry::user(format!("q{i}")), None);
        }
        let texts: Vec<&str> = transcript.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["q0", "q1", "q2", "q3", "q4"]);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut transcript = Transcript::seeded();
        transcript.append(ChatEntry::user("a"), Some(2));
        transcript.append(ChatEntry::bot("b"), Some(2));
        assert_eq!(transcript.entries(), &[ChatEntry::user("a"), ChatEntry::bot("b")]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let transcript = Transcript::seeded();
        let json = serde_json::to_string(&transcript).unwrap();
        assert_eq!(json, r#"[{"sender":"bot","text":"Hi! How can I help you?"}]"#);

        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back, transcript);
    }
}
