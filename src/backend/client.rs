use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A user message ready to go over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Trimmed, never empty.
    pub message: String,
    /// Routing identifier for the backend; empty when no server is selected.
    pub target: String,
}

impl OutboundRequest {
    /// Builds a request from raw input. Returns `None` for empty or
    /// whitespace-only input.
    pub fn new(input: &str, target: impl Into<String>) -> Option<Self> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        Some(Self {
            message: message.to_string(),
            target: target.into(),
        })
    }
}

/// A successful backend reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    /// Diagnostic side channel. Logged, never displayed.
    pub server_data_used: Option<Value>,
}

/// Errors from a chat exchange. `Display` is the text shown to the user.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never reached the server, or the response was unreadable.
    #[error("Network Error: Could not connect. {0}")]
    Transport(String),
    /// Non-success HTTP status.
    #[error("Error: {}", describe_http(.status, .message))]
    Http { status: u16, message: Option<String> },
    /// 2xx response carrying an `error` field.
    #[error("Error: {0}")]
    Application(String),
    /// 2xx response with neither `reply` nor `error`.
    #[error("Error: Server response contained neither a reply nor an error")]
    MalformedResponse,
}

fn describe_http(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => format!("Failed to get response from server (HTTP {status})"),
    }
}

/// The settled result of one exchange, as the view consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Success(ChatReply),
    ApplicationError(String),
    TransportError(String),
}

impl From<Result<ChatReply, ChatError>> for ChatOutcome {
    fn from(result: Result<ChatReply, ChatError>) -> Self {
        match result {
            Ok(reply) => ChatOutcome::Success(reply),
            Err(e @ ChatError::Transport(_)) => ChatOutcome::TransportError(e.to_string()),
            Err(e) => ChatOutcome::ApplicationError(e.to_string()),
        }
    }
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns a short name for logs.
    fn name(&self) -> &str;

    /// Sends one message and waits for the backend to answer.
    async fn exchange(&self, request: &OutboundRequest) -> Result<ChatReply, ChatError>;
}

/// Runs one exchange and folds it into a [`ChatOutcome`].
pub async fn dispatch(backend: &dyn ChatBackend, request: &OutboundRequest) -> ChatOutcome {
    ChatOutcome::from(backend.exchange(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_and_rejects_blank_input() {
        assert_eq!(OutboundRequest::new("   ", ""), None);
        assert_eq!(OutboundRequest::new("\n\t", "lobby"), None);

        let req = OutboundRequest::new("  hello  ", "lobby").unwrap();
        assert_eq!(req.message, "hello");
        assert_eq!(req.target, "lobby");
    }

    #[test]
    fn http_error_prefers_backend_message() {
        let err = ChatError::Http {
            status: 400,
            message: Some("bad server id".into()),
        };
        assert_eq!(err.to_string(), "Error: bad server id");
    }

    #[test]
    fn http_error_falls_back_to_status() {
        let err = ChatError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(
            err.to_string(),
            "Error: Failed to get response from server (HTTP 500)"
        );
    }

    #[test]
    fn outcome_from_result() {
        let ok = ChatOutcome::from(Ok(ChatReply {
            reply: "hi".into(),
            server_data_used: None,
        }));
        assert!(matches!(ok, ChatOutcome::Success(ref r) if r.reply == "hi"));

        let transport = ChatOutcome::from(Err(ChatError::Transport("refused".into())));
        assert_eq!(
            transport,
            ChatOutcome::TransportError("Network Error: Could not connect. refused".into())
        );

        let app = ChatOutcome::from(Err(ChatError::Application("missing API key".into())));
        assert_eq!(
            app,
            ChatOutcome::ApplicationError("Error: missing API key".into())
        );

        let malformed = ChatOutcome::from(Err(ChatError::MalformedResponse));
        assert!(matches!(malformed, ChatOutcome::ApplicationError(_)));
    }
}
