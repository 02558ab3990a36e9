use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// An ordered chat transcript. The last message is the pending question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Content of the last message, whatever its role.
    pub fn latest_message(&self) -> Result<&str, DomainError> {
        self.messages
            .last()
            .map(|m| m.content.as_str())
            .ok_or_else(|| DomainError::validation("conversation has no messages"))
    }

    /// Renders every message before the last as `ROLE: content`, one per
    /// line. System messages are left out.
    pub fn history_summary(&self) -> String {
        let earlier = match self.messages.split_last() {
            Some((_, earlier)) => earlier,
            None => return String::new(),
        };

        earlier
            .iter()
            .filter(|m| m.role.is_dialogue())
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Upper-case tag used in the history block of a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::User => "USER",
            Self::Assistant => "ASSISTANT",
        }
    }

    pub fn is_dialogue(&self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }
}
