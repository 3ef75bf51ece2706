//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use async_trait::async_trait;

use crate::backend::{ChatBackend, ChatError, ChatReply, OutboundRequest};

/// A backend that answers every message with a fixed reply.
pub struct EchoBackend;

#[async_trait]
impl ChatBackend for EchoBackend {
    fn name(&self) -> &str {
        "echo"
    }

    async fn exchange(&self, request: &OutboundRequest) -> Result<ChatReply, ChatError> {
        Ok(ChatReply {
            reply: format!("echo: {}", request.message),
            server_data_used: None,
        })
    }
}

/// Creates a test App backed by an EchoBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(EchoBackend))
}
