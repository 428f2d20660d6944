//! Route-level tests: profile, health and request correlation.
//!
//!   cargo test --test routes_tests

mod common;
mod support;

#[path = "suites/routes/mod.rs"]
mod routes;
