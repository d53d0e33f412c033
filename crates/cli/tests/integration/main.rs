//! CLI integration tests.

mod common;
mod deploy_tests;
