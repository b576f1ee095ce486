//! Reelpost Web - JSON API and webhook server
//!
//! Serves the post endpoint used by the browser client, the search endpoint,
//! and the Telegram bot webhook.

#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]

pub mod bot;
pub mod handlers;
pub mod server;

// Re-export main types
pub use bot::BotResponder;
pub use server::{AppState, build_router, run_server};
