//! Shared utilities.
//!
//! Test helpers for running shell commands portably.
