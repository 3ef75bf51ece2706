//! # Application State
//!
//! Core chat state. Domain logic only, no TUI types. Presentation state
//! (scroll position, input buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>   // where messages go
//! ├── messages: Vec<Message>          // display sequence, append-only
//! ├── pending: Option<usize>          // slot of the pending indicator
//! ├── servers: Vec<ServerEntry>       // known targets
//! ├── target: String                  // active server_id ("" = none)
//! ├── endpoint: String                // shown in the title bar
//! ├── pending_text: String            // pending indicator text
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use log::{debug, warn};
use std::sync::Arc;

use crate::backend::ChatBackend;
use crate::core::config::{DEFAULT_PENDING_TEXT, ResolvedConfig, ServerEntry};
use crate::core::message::{Category, Message, SENDER_ASSISTANT, SENDER_SYSTEM};

pub const WELCOME_TEXT: &str =
    "Welcome! Type a message and press **Enter** to chat. *Ctrl+T* picks a server.";

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub messages: Vec<Message>,
    /// Index of the pending indicator in `messages`. At most one exists.
    pub pending: Option<usize>,
    /// Total appends so far. Unlike `messages.len()`, this moves when a
    /// settle swaps the pending indicator for the reply.
    pub appended: usize,
    pub servers: Vec<ServerEntry>,
    pub target: String,
    pub endpoint: String,
    pub pending_text: String,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            messages: Vec::new(),
            pending: None,
            appended: 0,
            servers: Vec::new(),
            target: String::new(),
            endpoint: String::new(),
            pending_text: DEFAULT_PENDING_TEXT.to_string(),
            status_message: String::from("Ready"),
        }
    }

    pub fn from_config(backend: Arc<dyn ChatBackend>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(backend);
        app.servers = config.servers.clone();
        app.target = config.server_id.clone();
        app.endpoint = config.endpoint.clone();
        app.pending_text = config.pending_text.clone();
        app.push(Message::new(SENDER_SYSTEM, WELCOME_TEXT, Category::System));
        app
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Append to the display sequence.
    pub fn push(&mut self, message: Message) {
        debug!(
            "Appending {} message from {} ({} bytes)",
            message.category,
            message.sender,
            message.text.len()
        );
        self.messages.push(message);
        self.appended += 1;
    }

    /// Show the pending indicator, replacing any existing one.
    pub fn show_pending(&mut self) {
        if self.pending.is_some() {
            warn!("Pending indicator already shown, replacing it");
            self.clear_pending();
        }
        let indicator = Message::info(SENDER_ASSISTANT, self.pending_text.clone());
        self.push(indicator);
        self.pending = Some(self.messages.len() - 1);
    }

    /// Remove the pending indicator. Returns false if none was shown.
    pub fn clear_pending(&mut self) -> bool {
        let Some(idx) = self.pending.take() else {
            return false;
        };
        if idx < self.messages.len() {
            self.messages.remove(idx);
            true
        } else {
            warn!("Pending indicator slot {} out of range", idx);
            false
        }
    }

    /// Label for the active target, e.g. `"none"` or `"Hypixel (mc.hypixel.net:25565)"`.
    pub fn target_label(&self) -> String {
        if self.target.is_empty() {
            return "none".to_string();
        }
        self.servers
            .iter()
            .find(|s| s.name == self.target)
            .map(ServerEntry::label)
            .unwrap_or_else(|| self.target.clone())
    }

    /// Cycle none → each configured server → none.
    pub fn cycle_target(&mut self) {
        let next = if self.target.is_empty() {
            self.servers.first()
        } else {
            match self.servers.iter().position(|s| s.name == self.target) {
                Some(i) => self.servers.get(i + 1),
                // Ad-hoc target from CLI/env that isn't in the list
                None => self.servers.first(),
            }
        };
        self.target = next.map(|s| s.name.clone()).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.messages.is_empty());
        assert!(!app.is_pending());
        assert_eq!(app.target, "");
        assert_eq!(app.target_label(), "none");
        assert_eq!(app.status_message, "Ready");
    }

    #[test]
    fn test_from_config_shows_welcome() {
        let config = ResolvedConfig {
            server_id: "Hypixel".into(),
            servers: vec![ServerEntry::named("Hypixel")],
            ..Default::default()
        };
        let app = App::from_config(test_app().backend, &config);
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].category, Category::System);
        assert_eq!(app.target, "Hypixel");
    }

    #[test]
    fn test_pending_indicator_is_single() {
        let mut app = test_app();
        app.show_pending();
        app.show_pending();
        let pending: Vec<_> = app
            .messages
            .iter()
            .filter(|m| m.category == Category::Info)
            .collect();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].text, "Thinking...");
        assert_eq!(app.pending, Some(0));
    }

    #[test]
    fn test_clear_pending_only_once() {
        let mut app = test_app();
        app.push(Message::user("hi"));
        app.show_pending();
        assert!(app.clear_pending());
        assert!(!app.clear_pending());
        assert_eq!(app.messages, vec![Message::user("hi")]);
    }

    #[test]
    fn test_appended_counts_swap_of_pending_for_reply() {
        let mut app = test_app();
        app.push(Message::user("hi"));
        app.show_pending();
        let (len, appended) = (app.messages.len(), app.appended);

        app.clear_pending();
        app.push(Message::assistant("hello"));

        assert_eq!(app.messages.len(), len);
        assert_eq!(app.appended, appended + 1);
    }

    #[test]
    fn test_cycle_target_wraps_through_none() {
        let mut app = test_app();
        app.servers = vec![ServerEntry::named("a"), ServerEntry::named("b")];

        app.cycle_target();
        assert_eq!(app.target, "a");
        app.cycle_target();
        assert_eq!(app.target, "b");
        app.cycle_target();
        assert_eq!(app.target, "");
    }

    #[test]
    fn test_cycle_target_from_unknown_goes_to_first() {
        let mut app = test_app();
        app.servers = vec![ServerEntry::named("a")];
        app.target = "adhoc".into();
        assert_eq!(app.target_label(), "adhoc");
        app.cycle_target();
        assert_eq!(app.target, "a");
    }

    #[test]
    fn test_cycle_target_without_servers_stays_none() {
        let mut app = test_app();
        app.cycle_target();
        assert_eq!(app.target, "");
    }
}
