//! End-to-end tests for Reelpost
//!
//! These tests drive complete user workflows through the HTTP router, from
//! the inbound request to the messages the platform receives.

#[path = "../support.rs"]
mod support;

mod post_workflow;
