//! Integration tests for Reelpost
//!
//! Each module exercises one HTTP surface of the router against in-memory
//! providers.

#[path = "support.rs"]
mod support;

#[path = "integration/search_api.rs"]
mod search_api;

#[path = "integration/bot_webhook.rs"]
mod bot_webhook;

#[path = "integration/post_api.rs"]
mod post_api;
