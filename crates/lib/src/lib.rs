//! relkit-lib: release automation helpers
//!
//! This crate provides the behaviour behind the `relkit` binary:
//! - `deploy`: interprets a deploy manifest and assembles a zip archive
//! - `version`: regex version extraction and assembly version bumping
//! - `commit_msg`: tags commit messages with the current version
//! - `csv_sql`: turns a tab-separated export into a SQL insert statement

pub mod commit_msg;
pub mod consts;
pub mod csv_sql;
pub mod deploy;
pub mod exec;
pub mod util;
pub mod version;
