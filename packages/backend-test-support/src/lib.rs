//! Shared helpers for identity integration tests: one-time logging setup
//! and assertions on the service's error response shapes.

pub mod logging;
pub mod problem_details;
