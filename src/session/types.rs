use serde::{Deserialize, Serialize};

/// Author of a session message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the plugin user
    User,
    /// Reply produced by the service
    Assistant,
}

/// A single message in a session history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Position-derived identifier, assigned on append when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Message text
    pub content: String,
    /// Who wrote the message
    pub role: Role,
}

impl Message {
    /// Creates a user message without an id
    ///
    /// # Examples
    ///
    /// ```
    /// use comfy_copilot::session::{Message, Role};
    ///
    /// let msg = Message::user("make me a workflow");
    /// assert_eq!(msg.role, Role::User);
    /// assert!(msg.id.is_none());
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            role: Role::User,
        }
    }

    /// Creates an assistant message without an id
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            role: Role::Assistant,
        }
    }

    /// Sets an explicit id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
