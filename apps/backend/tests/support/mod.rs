#![allow(dead_code)]

pub mod app_builder;
pub mod logging;
pub mod state;

pub use app_builder::create_test_app;
pub use state::build_test_state;
