//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ResponseReceived(outcome)`.
//!
//! `update()` applies an action to the state and returns an `Effect` for the
//! adapter to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::backend::{ChatOutcome, OutboundRequest};
use crate::core::message::Message;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// Raw input from the send trigger (untrimmed).
    Submit(String),
    /// The in-flight request settled.
    ResponseReceived(ChatOutcome),
    CycleTarget,
    Quit,
}

/// Work the adapter must do after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    SpawnRequest(OutboundRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(input) => submit(app, &input),
        Action::ResponseReceived(outcome) => {
            settle(app, outcome);
            Effect::None
        }
        Action::CycleTarget => {
            app.cycle_target();
            app.status_message = format!("Server: {}", app.target_label());
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, input: &str) -> Effect {
    if app.is_pending() {
        warn!("Submit ignored: a request is already pending");
        return Effect::None;
    }
    let Some(request) = OutboundRequest::new(input, app.target.clone()) else {
        debug!("Submit ignored: empty input");
        return Effect::None;
    };

    app.push(Message::user(request.message.clone()));
    app.show_pending();
    app.status_message = String::from("Waiting for reply...");
    info!("Submitting message to server_id={:?}", request.target);
    Effect::SpawnRequest(request)
}

fn settle(app: &mut App, outcome: ChatOutcome) {
    if !app.clear_pending() {
        warn!("Response received with no pending indicator");
    }

    let message = match outcome {
        ChatOutcome::Success(reply) => {
            if let Some(data) = &reply.server_data_used {
                debug!("Server data used by LLM: {}", data);
            }
            app.status_message = String::from("Ready");
            Message::assistant(reply.reply)
        }
        ChatOutcome::ApplicationError(text) => {
            warn!("Backend error: {}", text);
            app.status_message = String::from("Last request failed");
            Message::system_error(text)
        }
        ChatOutcome::TransportError(text) => {
            warn!("Network error: {}", text);
            app.status_message = String::from("Last request failed");
            Message::system_error(text)
        }
    };
    app.push(message);
}
