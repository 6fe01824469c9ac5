//! Outbound integrations: HTTP client, page fetching and the chat transport.

pub mod client;
pub mod page;
pub mod telegram;
pub mod user_agent;
