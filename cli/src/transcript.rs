#[cfg(test)]
#[path = "transcript_test.rs"]
mod transcript_test;

use serde_json::{Value, json};

/// Client-held chat transcript: append-only, in input order, until an
/// explicit clear. The server never stores it; it travels whole as the
/// `chat_history` request field.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

/// A single chat message.
#[derive(Clone, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn wire_name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: &str) {
        self.messages.push(Message { role: Role::User, content: content.to_owned() });
    }

    pub fn push_assistant(&mut self, content: &str) {
        self.messages.push(Message { role: Role::Assistant, content: content.to_owned() });
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Wire form for the `chat_history` field.
    #[must_use]
    pub fn history_json(&self) -> Value {
        Value::Array(
            self.messages
                .iter()
                .map(|message| json!({ "role": message.role.wire_name(), "content": message.content }))
                .collect(),
        )
    }
}
