mod common;

use async_trait::async_trait;
use cmdb_application::{ChatEvent, ChatSession};
use cmdb_core::{CmdbError, Result};
use cmdb_core::cache::{CacheKey, CacheStore, read_json};
use cmdb_core::chat::{ChatEntry, ChatMode, GREETING, Transcript};
use cmdb_infrastructure::{FileCacheStore, InMemoryCacheStore};
use common::FakeApi;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, mpsc};

/// Store whose `n`-th write (1-based) fails with a disk error.
struct FailingWriteStore {
    inner: InMemoryCacheStore,
    writes: AtomicUsize,
    fail_on: usize,
}

impl FailingWriteStore {
    fn failing_on(fail_on: usize) -> Self {
        Self {
            inner: InMemoryCacheStore::new(),
            writes: AtomicUsize::new(0),
            fail_on,
        }
    }
}

#[async_trait]
impl CacheStore for FailingWriteStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.writes.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(CmdbError::io("disk full"));
        }
        self.inner.write(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }
}

fn expect_failure(event: ChatEvent, expected_question: &str, expected_error: &str) {
    match event {
        ChatEvent::Failed { question, error } => {
            assert_eq!(question, expected_question);
            assert!(error.contains(expected_error), "unexpected error: {error}");
        }
        other => panic!("expected failure event, got {other:?}"),
    }
}

async fn stored_transcript(store: &dyn CacheStore) -> Transcript {
    read_json(store, CacheKey::ChatHistory)
        .await
        .unwrap()
        .expect("chatHistory should be stored")
}

#[tokio::test]
async fn hydrate_seeds_and_persists_greeting() {
    let store = InMemoryCacheStore::new();
    let session = ChatSession::hydrate(Arc::new(FakeApi::new()), Arc::new(store.clone()), None)
        .await
        .unwrap();

    let transcript = session.transcript().await;
    assert_eq!(transcript.entries(), &[ChatEntry::bot(GREETING)]);
    assert_eq!(stored_transcript(&store).await, transcript);
    assert_eq!(session.mode().await, ChatMode::Idle);
}

#[tokio::test]
async fn hydrate_restores_existing_transcript() {
    let store = InMemoryCacheStore::with_entries([(
        "chatHistory",
        r#"[{"sender":"bot","text":"Hi! How can I help you?"},{"sender":"user","text":"earlier"}]"#,
    )]);
    let session = ChatSession::hydrate(Arc::new(FakeApi::new()), Arc::new(store), None)
        .await
        .unwrap();

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.last(), Some(&ChatEntry::user("earlier")));
}

#[tokio::test]
async fn hydrate_ignores_malformed_history() {
    let store = InMemoryCacheStore::with_entries([("chatHistory", "{\"sender\":")]);
    let session = ChatSession::hydrate(Arc::new(FakeApi::new()), Arc::new(store), None)
        .await
        .unwrap();

    assert_eq!(session.transcript().await, Transcript::seeded());
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let api = Arc::new(FakeApi::new());
    let store = InMemoryCacheStore::new();
    let session = ChatSession::hydrate(api.clone(), Arc::new(store), None)
        .await
        .unwrap();

    assert!(session.submit("   \n").await.unwrap().is_none());
    assert_eq!(session.transcript().await.len(), 1);
    assert_eq!(session.mode().await, ChatMode::Idle);
    assert!(api.questions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn hello_round_trip_walks_the_state_machine() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(
        FakeApi::new()
            .with_answers(vec![Ok("Hello! Ask me about your account.".to_string())])
            .with_gate(gate.clone()),
    );
    let store = InMemoryCacheStore::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = ChatSession::hydrate(api.clone(), Arc::new(store.clone()), None)
        .await
        .unwrap()
        .with_event_sender(tx);

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.submit("  hello ").await }
    });

    // The user entry lands before the answer does.
    let first = rx.recv().await.unwrap();
    assert_eq!(first, ChatEvent::Appended(ChatEntry::user("hello")));
    assert_eq!(session.mode().await, ChatMode::AwaitingResponse { pending: 1 });
    assert_eq!(
        stored_transcript(&store).await.last(),
        Some(&ChatEntry::user("hello"))
    );

    gate.notify_one();
    let reply = task.await.unwrap().unwrap();

    let bot = ChatEntry::bot("Hello! Ask me about your account.");
    assert_eq!(reply, Some(bot.clone()));
    assert_eq!(rx.recv().await.unwrap(), ChatEvent::Appended(bot.clone()));
    assert_eq!(session.mode().await, ChatMode::Idle);

    let transcript = session.transcript().await;
    assert_eq!(
        transcript.entries(),
        &[ChatEntry::bot(GREETING), ChatEntry::user("hello"), bot]
    );
    assert_eq!(stored_transcript(&store).await, transcript);
    assert_eq!(api.questions.lock().unwrap().as_slice(), &["hello".to_string()]);
}

#[tokio::test]
async fn overlapping_questions_keep_awaiting_until_all_settle() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(FakeApi::new().with_gate(gate.clone()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = ChatSession::hydrate(api, Arc::new(InMemoryCacheStore::new()), None)
        .await
        .unwrap()
        .with_event_sender(tx);

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.submit("one").await }
    });
    rx.recv().await.unwrap();
    let second = tokio::spawn({
        let session = session.clone();
        async move { session.submit("two").await }
    });
    rx.recv().await.unwrap();
    assert_eq!(session.mode().await, ChatMode::AwaitingResponse { pending: 2 });

    gate.notify_one();
    rx.recv().await.unwrap();
    assert_eq!(session.mode().await.pending(), 1);

    gate.notify_one();
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();
    assert_eq!(session.mode().await, ChatMode::Idle);
    // greeting + two questions + two answers
    assert_eq!(session.transcript().await.len(), 5);
}

#[tokio::test]
async fn failed_question_settles_and_reports() {
    let api = Arc::new(FakeApi::new().with_answers(vec![Err(CmdbError::api(
        Some(500),
        "Error getting response: quota exceeded",
    ))]));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = ChatSession::hydrate(api, Arc::new(InMemoryCacheStore::new()), None)
        .await
        .unwrap()
        .with_event_sender(tx);

    let err = session.submit("why?").await.unwrap_err();

    assert_eq!(err.api_status(), Some(500));
    assert_eq!(session.mode().await, ChatMode::Idle);
    assert_eq!(session.transcript().await.last(), Some(&ChatEntry::user("why?")));

    assert_eq!(rx.recv().await.unwrap(), ChatEvent::Appended(ChatEntry::user("why?")));
    expect_failure(rx.recv().await.unwrap(), "why?", "quota exceeded");
}

#[tokio::test]
async fn history_cap_drops_oldest_entries() {
    let store = InMemoryCacheStore::new();
    let session = ChatSession::hydrate(Arc::new(FakeApi::new()), Arc::new(store.clone()), Some(2))
        .await
        .unwrap();

    session.submit("first").await.unwrap();
    session.submit("second").await.unwrap();

    let transcript = session.transcript().await;
    assert_eq!(
        transcript.entries(),
        &[ChatEntry::user("second"), ChatEntry::bot("echo: second")]
    );
    assert_eq!(stored_transcript(&store).await, transcript);
}

#[tokio::test]
async fn transcript_survives_restart_on_disk() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(FileCacheStore::with_dir(temp_dir.path()));

    let session = ChatSession::hydrate(Arc::new(FakeApi::new()), store.clone(), None)
        .await
        .unwrap();
    session.submit("persist me").await.unwrap();
    let before = session.transcript().await;
    drop(session);

    let reopened = ChatSession::hydrate(Arc::new(FakeApi::new()), store, None)
        .await
        .unwrap();
    assert_eq!(reopened.transcript().await, before);
}

#[tokio::test]
async fn unsaved_question_leaves_transcript_untouched() {
    // Write 1 is the seeded greeting, write 2 the user entry.
    let store = Arc::new(FailingWriteStore::failing_on(2));
    let api = Arc::new(FakeApi::new());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = ChatSession::hydrate(api.clone(), store.clone(), None)
        .await
        .unwrap()
        .with_event_sender(tx);

    let err = session.submit("hello").await.unwrap_err();

    assert!(err.to_string().contains("disk full"));
    assert_eq!(session.transcript().await, Transcript::seeded());
    assert_eq!(session.mode().await, ChatMode::Idle);
    assert!(api.questions.lock().unwrap().is_empty());
    expect_failure(rx.recv().await.unwrap(), "hello", "disk full");
    assert!(rx.try_recv().is_err());
    assert_eq!(stored_transcript(store.as_ref()).await, Transcript::seeded());
}

#[tokio::test]
async fn unsaved_answer_is_reported_and_not_kept() {
    // Write 3 is the bot entry.
    let store = Arc::new(FailingWriteStore::failing_on(3));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = ChatSession::hydrate(Arc::new(FakeApi::new()), store.clone(), None)
        .await
        .unwrap()
        .with_event_sender(tx);

    let err = session.submit("hello").await.unwrap_err();

    assert!(err.to_string().contains("disk full"));
    assert_eq!(session.mode().await, ChatMode::Idle);
    let transcript = session.transcript().await;
    assert_eq!(
        transcript.entries(),
        &[ChatEntry::bot(GREETING), ChatEntry::user("hello")]
    );
    assert_eq!(stored_transcript(store.as_ref()).await, transcript);

    assert_eq!(rx.recv().await.unwrap(), ChatEvent::Appended(ChatEntry::user("hello")));
    expect_failure(rx.recv().await.unwrap(), "hello", "disk full");
    assert!(rx.try_recv().is_err());

    // The store recovers, so the next question goes through.
    let reply = session.submit("again").await.unwrap();
    assert_eq!(reply, Some(ChatEntry::bot("echo: again")));
    assert_eq!(session.transcript().await.len(), 4);
}
