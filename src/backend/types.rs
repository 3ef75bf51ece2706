//! Wire types for the chat route.
//!
//! ```text
//! POST /chat_with_llm   { "message": "...", "server_id": "..." }
//! 2xx                   { "reply": "...", "server_data_used": ... } | { "error": "..." }
//! non-2xx               { "error": "..." } (optional)
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{ChatError, ChatReply, OutboundRequest};

#[derive(Serialize, Debug, PartialEq)]
pub struct ChatRequestBody<'a> {
    pub message: &'a str,
    pub server_id: &'a str,
}

impl<'a> From<&'a OutboundRequest> for ChatRequestBody<'a> {
    fn from(request: &'a OutboundRequest) -> Self {
        Self {
            message: &request.message,
            server_id: &request.target,
        }
    }
}

/// Body of a 2xx response. Exactly one of `reply` / `error` is expected.
#[derive(Deserialize, Debug, Default)]
pub struct ChatResponseBody {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub server_data_used: Option<Value>,
}

impl ChatResponseBody {
    /// Decode a raw 2xx body.
    ///
    /// Text that is not JSON is unreadable (`Transport`). JSON of the wrong
    /// shape, e.g. a numeric `reply`, got through but makes no sense
    /// (`MalformedResponse`).
    pub fn decode(raw: &str) -> Result<Self, ChatError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            warn!("Unreadable chat response body: {}", e);
            ChatError::Transport(e.to_string())
        })?;
        serde_json::from_value(value).map_err(|e| {
            warn!("Chat response has unexpected shape: {}", e);
            ChatError::MalformedResponse
        })
    }

    /// Interpret the body. Empty strings count as absent.
    pub fn into_result(self) -> Result<ChatReply, ChatError> {
        match (non_empty(self.reply), non_empty(self.error)) {
            (Some(reply), _) => Ok(ChatReply {
                reply,
                server_data_used: self.server_data_used,
            }),
            (None, Some(error)) => Err(ChatError::Application(error)),
            (None, None) => Err(ChatError::MalformedResponse),
        }
    }
}

/// Body of a non-2xx response.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extract the backend's error message from a raw body, if there is one.
    pub fn message_from(raw: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .and_then(|body| non_empty(body.error))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
