//! Chat session: transcript, request/response cycle and persistence.
//!
//! Each submission appends the user's entry, asks the backend and appends
//! the answer. Submissions may overlap; answers are appended in arrival
//! order and are not correlated with the question that produced them.
//! Every transcript mutation is written to the `chatHistory` cache entry.

use cmdb_core::{CmdbError, Result};
use cmdb_core::api::DashboardApi;
use cmdb_core::cache::{CacheKey, CacheStore, read_json, write_json};
use cmdb_core::chat::{ChatEntry, ChatMode, Transcript};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Notifications for the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// An entry was appended and persisted.
    Appended(ChatEntry),
    /// A question failed or its entry could not be saved. Nothing was
    /// appended for the failing step.
    Failed { question: String, error: String },
}

#[derive(Debug, Default)]
struct ChatState {
    transcript: Transcript,
    mode: ChatMode,
}

/// Shared chat state. Clones refer to the same transcript.
#[derive(Clone)]
pub struct ChatSession {
    api: Arc<dyn DashboardApi>,
    store: Arc<dyn CacheStore>,
    state: Arc<Mutex<ChatState>>,
    max_history: Option<usize>,
    events: Option<mpsc::UnboundedSender<ChatEvent>>,
}

impl ChatSession {
    /// Restores the transcript from the cache, or seeds it with the greeting
    /// and persists the seed.
    pub async fn hydrate(
        api: Arc<dyn DashboardApi>,
        store: Arc<dyn CacheStore>,
        max_history: Option<usize>,
    ) -> Result<Self> {
        let transcript = match read_json::<Transcript>(store.as_ref(), CacheKey::ChatHistory).await? {
            Some(transcript) => {
                tracing::debug!(entries = transcript.len(), "[ChatSession] Restored transcript");
                transcript
            }
            None => {
                let seeded = Transcript::seeded();
                write_json(store.as_ref(), CacheKey::ChatHistory, &seeded).await?;
                tracing::debug!("[ChatSession] Seeded new transcript");
                seeded
            }
        };

        Ok(Self {
            api,
            store,
            state: Arc::new(Mutex::new(ChatState {
                transcript,
                mode: ChatMode::Idle,
            })),
            max_history,
            events: None,
        })
    }

    /// Routes [`ChatEvent`]s to `sender`.
    pub fn with_event_sender(mut self, sender: mpsc::UnboundedSender<ChatEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    pub async fn transcript(&self) -> Transcript {
        self.state.lock().await.transcript.clone()
    }

    pub async fn mode(&self) -> ChatMode {
        self.state.lock().await.mode
    }

    /// Runs one request/response cycle.
    ///
    /// Returns `Ok(None)` without touching any state when the trimmed input
    /// is empty, and the appended bot entry otherwise. An entry only joins
    /// the in-memory transcript once it is saved. A failed question or a
    /// failed save settles the pending count, emits [`ChatEvent::Failed`]
    /// and returns the error.
    pub async fn submit(&self, input: &str) -> Result<Option<ChatEntry>> {
        let question = input.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let user_entry = ChatEntry::user(question);
        {
            let mut state = self.state.lock().await;
            if let Err(e) = self.append_saved(&mut state.transcript, user_entry.clone()).await {
                drop(state);
                return Err(self.fail(question, e));
            }
            state.mode = state.mode.submitted();
            tracing::debug!(pending = state.mode.pending(), "[ChatSession] Question submitted");
        }
        self.emit(ChatEvent::Appended(user_entry));

        // The lock is not held here so other submissions can proceed.
        let answer = self.api.ask_question(question).await;

        let mut state = self.state.lock().await;
        state.mode = state.mode.settled();
        let bot_entry = match answer {
            Ok(text) => ChatEntry::bot(text),
            Err(e) => {
                drop(state);
                return Err(self.fail(question, e));
            }
        };
        if let Err(e) = self.append_saved(&mut state.transcript, bot_entry.clone()).await {
            drop(state);
            return Err(self.fail(question, e));
        }
        drop(state);

        self.emit(ChatEvent::Appended(bot_entry.clone()));
        Ok(Some(bot_entry))
    }

    /// Appends `entry` to `transcript` only if the result persists.
    async fn append_saved(&self, transcript: &mut Transcript, entry: ChatEntry) -> Result<()> {
        let mut next = transcript.clone();
        next.append(entry, self.max_history);
        self.persist(&next).await?;
        *transcript = next;
        Ok(())
    }

    fn fail(&self, question: &str, error: CmdbError) -> CmdbError {
        tracing::error!(error = %error, "[ChatSession] Question failed");
        self.emit(ChatEvent::Failed {
            question: question.to_string(),
            error: error.to_string(),
        });
        error
    }

    async fn persist(&self, transcript: &Transcript) -> Result<()> {
        write_json(self.store.as_ref(), CacheKey::ChatHistory, transcript).await
    }

    fn emit(&self, event: ChatEvent) {
        if let Some(sender) = &self.events {
            // A closed receiver only means nobody is listening any more
            let _ = sender.send(event);
        }
    }
}
