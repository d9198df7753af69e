//! In-memory session history
//!
//! Sessions are keyed by a caller-supplied identifier and hold an
//! append-only list of messages. Unknown sessions read as empty; a session
//! comes into existence on its first append and is never removed.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub mod types;
pub use types::{Message, Role};

/// Storage seam for session histories
///
/// Neither operation can fail: `get` on an unknown session yields an empty
/// list, and `append` creates the session when needed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append a message to the end of a session, creating it if absent
    async fn append(&self, session_id: &str, message: Message);

    /// Append several messages as one contiguous run
    ///
    /// No message from a concurrent writer lands between them.
    async fn append_all(&self, session_id: &str, messages: Vec<Message>);

    /// Return a snapshot of a session's messages in append order
    async fn get(&self, session_id: &str) -> Vec<Message>;
}

/// Process-wide session store with per-session locking
///
/// The outer lock is held only long enough to find or create a session
/// slot; appends then serialize on that session's own mutex, so writers to
/// different sessions never wait on each other.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Vec<Message>>>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions that have received at least one message
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn slot(&self, session_id: &str) -> Arc<Mutex<Vec<Message>>> {
        if let Some(slot) = self.sessions.read().await.get(session_id) {
            return Arc::clone(slot);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Vec::new()))),
        )
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn append(&self, session_id: &str, message: Message) {
        self.append_all(session_id, vec![message]).await;
    }

    async fn append_all(&self, session_id: &str, batch: Vec<Message>) {
        let slot = self.slot(session_id).await;
        let mut messages = slot.lock().await;
        for mut message in batch {
            if message.id.is_none() {
                message.id = Some(messages.len().to_string());
            }
            tracing::debug!(session_id, role = ?message.role, position = messages.len(), "Appending message");
            messages.push(message);
        }
    }

    async fn get(&self, session_id: &str) -> Vec<Message> {
        let slot = match self.sessions.read().await.get(session_id) {
            Some(slot) => Arc::clone(slot),
            None => return Vec::new(),
        };
        let messages = slot.lock().await;
        messages.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_unknown_session_is_empty() {
        let store = InMemorySessionStore::new();
        assert!(store.get("missing").await.is_empty());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = InMemorySessionStore::new();
        for i in 0..5 {
            store.append("s1", Message::user(format!("msg {}", i))).await;
        }

        let messages = store.get("s1").await;
        assert_eq!(messages.len(), 5);
        for (i, msg) in messages.iter().enumerate() {
            assert_eq!(msg.content, format!("msg {}", i));
        }
    }

    #[tokio::test]
    async fn test_append_assigns_positional_ids() {
        let store = InMemorySessionStore::new();
        store.append("s1", Message::user("a")).await;
        store.append("s1", Message::assistant("b")).await;

        let messages = store.get("s1").await;
        assert_eq!(messages[0].id.as_deref(), Some("0"));
        assert_eq!(messages[1].id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_append_keeps_explicit_id() {
        let store = InMemorySessionStore::new();
        store.append("s1", Message::user("a").with_id("custom")).await;
        assert_eq!(store.get("s1").await[0].id.as_deref(), Some("custom"));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        store.append("a", Message::user("for a")).await;
        store.append("b", Message::user("for b")).await;
        store.append("b", Message::user("again b")).await;

        assert_eq!(store.get("a").await.len(), 1);
        assert_eq!(store.get("b").await.len(), 2);
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.append("shared", Message::user(format!("{}", i))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let messages = store.get("shared").await;
        assert_eq!(messages.len(), 50);
        let mut ids: Vec<usize> = messages
            .iter()
            .map(|m| m.id.as_deref().unwrap().parse().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..50).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_append_all_keeps_batches_contiguous() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .append_all(
                        "pairs",
                        vec![
                            Message::user(format!("q{}", i)),
                            Message::assistant(format!("a{}", i)),
                        ],
                    )
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let messages = store.get("pairs").await;
        assert_eq!(messages.len(), 40);
        for pair in messages.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
            assert_eq!(pair[0].content[1..], pair[1].content[1..]);
        }
        assert_eq!(messages[39].id.as_deref(), Some("39"));
    }

    #[tokio::test]
    async fn test_append_all_empty_batch_is_noop() {
        let store = InMemorySessionStore::new();
        store.append_all("s1", Vec::new()).await;
        assert!(store.get("s1").await.is_empty());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::assistant("hi").with_id("3");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
        assert_eq!(json["id"], "3");

        let no_id = serde_json::to_value(Message::user("x")).unwrap();
        assert!(no_id.get("id").is_none());
    }
}
