//! # Messages
//!
//! The display record appended to the chat view. A `Message` is never edited
//! after it is created; the view only ever appends (and drops the pending
//! indicator when a request settles).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sender label for messages typed by the user.
pub const SENDER_USER: &str = "You";
/// Sender label for backend replies and the pending indicator.
pub const SENDER_ASSISTANT: &str = "Assistant";
/// Sender label for errors and notices raised by the client itself.
pub const SENDER_SYSTEM: &str = "System";

/// Presentation tag on a message. Controls styling only, never semantics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    User,
    /// Assistant reply.
    #[serde(alias = "assistant")]
    Llm,
    Error,
    Info,
    System,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::User => "user",
            Category::Llm => "llm",
            Category::Error => "error",
            Category::Info => "info",
            Category::System => "system",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: String,
    /// May contain `**bold**` and `*italic*` markers, see [`crate::core::markup`].
    pub text: String,
    pub category: Category,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, category: Category) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            category,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(SENDER_USER, text, Category::User)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(SENDER_ASSISTANT, text, Category::Llm)
    }

    /// A client-side error surfaced to the user.
    pub fn system_error(text: impl Into<String>) -> Self {
        Self::new(SENDER_SYSTEM, text, Category::Error)
    }

    pub fn info(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(sender, text, Category::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_sender_and_category() {
        let m = Message::user("hi");
        assert_eq!(m.sender, "You");
        assert_eq!(m.category, Category::User);

        let m = Message::assistant("hello");
        assert_eq!(m.sender, "Assistant");
        assert_eq!(m.category, Category::Llm);

        let m = Message::system_error("boom");
        assert_eq!(m.sender, "System");
        assert_eq!(m.category, Category::Error);
    }

    #[test]
    fn category_labels() {
        assert_eq!(Category::Llm.label(), "llm");
        assert_eq!(Category::Info.to_string(), "info");
    }

    #[test]
    fn category_accepts_assistant_alias() {
        let c: Category = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(c, Category::Llm);
        assert_eq!(serde_json::to_string(&Category::Llm).unwrap(), "\"llm\"");
    }
}
