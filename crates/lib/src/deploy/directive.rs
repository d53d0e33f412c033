//! Manifest line parsing.
//!
//! Each line of a deploy manifest is one directive. Lines of the form
//! `NAME=VALUE` are assignments; everything else names a file to include.

use std::sync::LazyLock;

use regex::Regex;

use super::types::DeployError;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?)=(.+)$").expect("static regex"));

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
  /// `version=<file>=<regex>`
  Version { file: &'a str, pattern: &'a str },
  /// `copy-to=<path>`
  CopyTo(&'a str),
  /// `filename=<template>`
  Filename(&'a str),
  /// `<name>=<command>`: run `command`, save its stdout as `name`, include it.
  Capture { name: &'a str, command: &'a str },
  /// A file already on disk to include as-is.
  Include(&'a str),
  /// Nothing but whitespace.
  Blank,
}

/// Parse one manifest line. Surrounding whitespace is ignored.
pub fn parse_line(line: &str) -> Result<Directive<'_>, DeployError> {
  let line = line.trim();
  if line.is_empty() {
    return Ok(Directive::Blank);
  }

  let Some((name, value)) = split_assignment(line) else {
    return Ok(Directive::Include(line));
  };

  let directive = match name {
    "version" => {
      let (file, pattern) = split_assignment(value).ok_or_else(|| DeployError::MalformedVersion {
        value: value.to_string(),
      })?;
      Directive::Version { file, pattern }
    }
    "copy-to" => Directive::CopyTo(value),
    "filename" => Directive::Filename(value),
    _ => Directive::Capture { name, command: value },
  };

  Ok(directive)
}

/// Split `NAME=VALUE` at the first `=` that leaves both sides non-empty.
fn split_assignment(s: &str) -> Option<(&str, &str)> {
  let caps = ASSIGNMENT.captures(s)?;
  let name = caps.get(1)?.as_str();
  let value = caps.get(2)?.as_str();
  Some((name, value))
}
