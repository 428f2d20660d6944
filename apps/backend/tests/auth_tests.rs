//! Authentication tests: registration, login and the authorization gate.
//!
//! Run all auth tests:
//!   cargo test --test auth_tests
//!
//! Run one suite:
//!   cargo test --test auth_tests auth::gate::

mod common;
mod support;

#[path = "suites/auth/mod.rs"]
mod auth;
