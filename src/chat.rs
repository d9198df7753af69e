//! Non-streaming chat replies
//!
//! `POST /chat` answers with one JSON object instead of a frame stream. The
//! reply comes from its own ordered keyword rules ("hello", then "workflow",
//! then an echo). Both the user turn and the reply are recorded in the shared
//! session store, so `fetch-messages` sees them alongside streamed sessions.

use crate::reply::rules::{first_match, KeywordRule};
use crate::session::{Message, SessionStore};
use serde::{Deserialize, Serialize};

/// Body accepted by the chat and workflow generation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Body returned by the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub session_id: String,
    pub response: String,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

const GREETING: &str =
    "Hello! I'm ComfyUI-Copilot. Ask me to build a workflow, find nodes, or recommend what to add next.";
const WORKFLOW_HELP: &str =
    "I can help you build a workflow. Describe the image you want, or pick a template to start from.";

/// Chat reply rules, highest priority first
pub const CHAT_RULES: &[KeywordRule<String>] = &[
    KeywordRule {
        keyword: "hello",
        build: greeting,
    },
    KeywordRule {
        keyword: "workflow",
        build: workflow_help,
    },
];

fn greeting(_message: &str) -> String {
    GREETING.to_string()
}

fn workflow_help(_message: &str) -> String {
    WORKFLOW_HELP.to_string()
}

fn echo(message: &str) -> String {
    format!("You said: {}", message)
}

/// Pick the reply text for a chat message
///
/// # Examples
///
/// ```
/// use comfy_copilot::chat::reply_text;
///
/// assert!(reply_text("Hello there").starts_with("Hello!"));
/// assert_eq!(reply_text("ping"), "You said: ping");
/// ```
pub fn reply_text(message: &str) -> String {
    first_match(CHAT_RULES, message, echo)
}

/// Answer a chat request and record both turns as one contiguous pair
pub async fn invoke_chat(store: &dyn SessionStore, request: &ChatRequest) -> ChatReply {
    let response = reply_text(&request.message);

    store
        .append_all(
            &request.session_id,
            vec![
                Message::user(request.message.as_str()),
                Message::assistant(response.as_str()),
            ],
        )
        .await;

    tracing::debug!(session_id = %request.session_id, "Chat reply recorded");

    ChatReply {
        session_id: request.session_id.clone(),
        response,
        timestamp: chrono::Utc::now().timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{InMemorySessionStore, Role};

    #[test]
    fn test_reply_text_greeting() {
        assert_eq!(reply_text("HELLO"), GREETING);
    }

    #[test]
    fn test_reply_text_workflow() {
        assert_eq!(reply_text("new workflow please"), WORKFLOW_HELP);
    }

    #[test]
    fn test_reply_text_hello_outranks_workflow() {
        assert_eq!(reply_text("hello, workflow?"), GREETING);
    }

    #[test]
    fn test_reply_text_echo_keeps_original_case() {
        assert_eq!(reply_text("Make It Blue"), "You said: Make It Blue");
    }

    #[tokio::test]
    async fn test_invoke_chat_records_both_turns() {
        let store = InMemorySessionStore::new();
        let request = ChatRequest {
            session_id: "s1".to_string(),
            message: "hello".to_string(),
        };

        let reply = invoke_chat(&store, &request).await;

        assert_eq!(reply.session_id, "s1");
        assert_eq!(reply.response, GREETING);
        assert!(reply.timestamp > 0);

        let messages = store.get("s1").await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, GREETING);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_chats_keep_turn_pairs_together() {
        let store = std::sync::Arc::new(InMemorySessionStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let request = ChatRequest {
                    session_id: "busy".to_string(),
                    message: format!("msg {}", i),
                };
                invoke_chat(store.as_ref(), &request).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let messages = store.get("busy").await;
        assert_eq!(messages.len(), 32);
        for pair in messages.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
            assert_eq!(pair[1].content, format!("You said: {}", pair[0].content));
        }
    }
}
