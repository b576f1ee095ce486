//! HTTP request handlers organized by functionality

pub mod auth;
pub mod error;
pub mod post;
pub mod search;
pub mod system;
pub mod webhook;

// Re-export handler functions
pub use auth::{Authorized, WebhookAuthorized};
pub use error::ApiError;
pub use post::{handle_post, outcome_response};
pub use search::{SearchParams, handle_search};
pub use system::{
    health, not_found, post_method_fallback, preflight, webhook_method_fallback,
};
pub use webhook::handle_webhook;
