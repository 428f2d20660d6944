#![allow(dead_code)]

pub mod app_builder;
pub mod factory;
pub mod keys;

pub use app_builder::{create_test_app, test_state};
