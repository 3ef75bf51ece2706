//! HTTP backend: posts each message to the chat route of the web backend.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{ChatBackend, ChatError, ChatReply, OutboundRequest};
use super::types::{ChatRequestBody, ChatResponseBody, ErrorBody};

/// Route on the backend dedicated to chat exchange.
pub const CHAT_ROUTE: &str = "/chat_with_llm";

pub struct HttpChatBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatBackend {
    /// `endpoint` is the backend base URL, e.g. `http://127.0.0.1:5000`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.endpoint, CHAT_ROUTE)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn exchange(&self, request: &OutboundRequest) -> Result<ChatReply, ChatError> {
        let url = self.url();
        info!(
            "Chat request: url={}, message_len={}, server_id={:?}",
            url,
            request.message.len(),
            request.target
        );

        let response = self
            .client
            .post(&url)
            .json(&ChatRequestBody::from(request))
            .send()
            .await
            .map_err(|e| {
                warn!("Chat request failed to send: {}", e);
                ChatError::Transport(e.to_string())
            })?;

        let status = response.status();
        debug!("Chat response status: {}", status);

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = ErrorBody::message_from(&raw);
            if message.is_none() {
                warn!("Could not parse JSON error response from server: {:?}", raw);
            }
            return Err(ChatError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await.map_err(|e| {
            warn!("Failed to read chat response body: {}", e);
            ChatError::Transport(e.to_string())
        })?;

        ChatResponseBody::decode(&raw)?.into_result()
    }
}
