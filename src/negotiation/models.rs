//! Data models for negotiation chat

use serde::{Deserialize, Serialize};

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message in OpenAI-compatible shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Ordered message sequence for one chat turn.
///
/// Invariant: the first message is the only system message and the last
/// one is the new user message. Only [`super::build_context`] creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NegotiationContext {
    messages: Vec<ChatMessage>,
}

impl NegotiationContext {
    pub(super) fn from_parts(
        system: ChatMessage,
        history: Vec<ChatMessage>,
        latest: ChatMessage,
    ) -> Self {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(system);
        messages.extend(history);
        messages.push(latest);
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn system(&self) -> &ChatMessage {
        &self.messages[0]
    }

    pub fn latest(&self) -> &ChatMessage {
        &self.messages[self.messages.len() - 1]
    }

    /// Prior turns between the system message and the new message
    pub fn history(&self) -> &[ChatMessage] {
        &self.messages[1..self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total characters across all messages
    pub fn char_count(&self) -> usize {
        self.messages.iter().map(|m| m.content.chars().count()).sum()
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}
