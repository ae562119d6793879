//! Conversation state: role-tagged messages and the append-only context

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in the conversation.
///
/// Serializes to the `{"role": ..., "content": ...}` shape that chat
/// completion endpoints expect. Fields are private: a message never changes
/// after it has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when the content is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Ordered dialogue history threaded between completion calls.
///
/// Insertion order is chronological order, which is also the order the
/// provider receives the messages in. There is no way to remove or reorder
/// messages; a context only grows until the run that owns it is dropped.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    session_id: Uuid,
    messages: Vec<Message>,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationContext {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            messages: Vec::new(),
        }
    }

    /// Identifier of the run that owns this context (used in log spans)
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Append a message at the end of the history
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a completed user/assistant exchange, in that order
    pub fn push_exchange(&mut self, prompt: Message, response: Message) {
        self.messages.push(prompt);
        self.messages.push(response);
    }

    /// Copy of the history with `message` appended; `self` is left untouched
    pub fn with_message(&self, message: Message) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend(self.messages.iter().cloned());
        messages.push(message);
        messages
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}
