use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{INPUT_HEIGHT, MessageList, TitleBar};

/// Draw the whole screen: title bar, message list, input box.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    MessageList::new(
        &mut tui.message_list,
        &app.messages,
        app.pending,
        app.appended,
        tui.pulse_value,
    )
    .render(frame, main_area);

    TitleBar::new(
        app.endpoint.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_conversation() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = test_app();
        app.endpoint = "http://127.0.0.1:5000".into();
        let mut tui = TuiState::new();

        update(&mut app, Action::Submit("Hello".into()));
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        let out = screen(&terminal);
        assert!(out.contains("MCP Chat (http://127.0.0.1:5000)"));
        assert!(out.contains("You:"));
        assert!(out.contains("Thinking..."));
    }

    #[test]
    fn test_scroll_pinned_after_many_messages() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut app = test_app();
        let mut tui = TuiState::new();

        for i in 0..10 {
            app.push(crate::core::message::Message::user(format!("message {i}")));
            terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
            assert_eq!(
                tui.message_list.offset(),
                tui.message_list.max_offset(),
                "offset must be at max after append {i}"
            );
        }
        assert!(screen(&terminal).contains("message 9"));
    }

    #[test]
    fn test_reply_repins_view_scrolled_up_while_pending() {
        use crate::backend::{ChatOutcome, ChatReply};
        use crate::tui::component::EventHandler;
        use crate::tui::event::TuiEvent;

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let mut app = test_app();
        let mut tui = TuiState::new();
        for i in 0..6 {
            app.push(crate::core::message::Message::user(format!("message {i}")));
        }
        update(&mut app, Action::Submit("question".into()));
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        tui.message_list.handle_event(&TuiEvent::ScrollPageUp);
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        assert!(tui.message_list.has_unseen_content());

        update(
            &mut app,
            Action::ResponseReceived(ChatOutcome::Success(ChatReply {
                reply: "the answer".into(),
                server_data_used: None,
            })),
        );
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        assert_eq!(tui.message_list.offset(), tui.message_list.max_offset());
        assert!(screen(&terminal).contains("the answer"));
    }
}
