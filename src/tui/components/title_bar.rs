//! # TitleBar Component
//!
//! Top status bar: backend endpoint, status text, and a "↓ New" marker when
//! there is content below the current scroll position.
//!
//! Stateless; every field is a prop from the parent:
//! - `endpoint`: core App state (configuration)
//! - `status_message`: core App state
//! - `has_unseen_content`: TUI state (scroll position)
//!
//! The title text changes based on state:
//!
//! 1. **Unseen content**: `"MCP Chat (http://127.0.0.1:5000) | Ready | ↓ New"`
//! 2. **Status message**: `"MCP Chat (http://127.0.0.1:5000) | Ready"`
//! 3. **Default**: `"MCP Chat (http://127.0.0.1:5000)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    pub endpoint: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(endpoint: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            endpoint,
            status_message,
            has_unseen_content,
        }
    }

    pub fn text(&self) -> String {
        let mut text = format!("MCP Chat ({})", self.endpoint);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format() {
        let bar = TitleBar::new("http://x".into(), String::new(), false);
        assert_eq!(bar.text(), "MCP Chat (http://x)");
    }

    #[test]
    fn with_status() {
        let bar = TitleBar::new("http://x".into(), "Ready".into(), false);
        assert_eq!(bar.text(), "MCP Chat (http://x) | Ready");
    }

    #[test]
    fn with_unseen_content() {
        let bar = TitleBar::new("http://x".into(), "Ready".into(), true);
        assert_eq!(bar.text(), "MCP Chat (http://x) | Ready | ↓ New");
    }
}
