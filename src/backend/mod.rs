pub mod client;
pub mod http;
pub mod types;

pub use client::{ChatBackend, ChatError, ChatOutcome, ChatReply, OutboundRequest, dispatch};
pub use http::{CHAT_ROUTE, HttpChatBackend};
