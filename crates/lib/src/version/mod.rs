//! Version extraction and rewriting.
//!
//! Versions live inside arbitrary text files and are located with a regular
//! expression whose first capture group is the version itself. The same
//! expression can later be used as a rewrite rule against the matched text,
//! with a Python-style replacement template (`\1`, `\g<name>`).

pub mod bump;
mod template;

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use thiserror::Error;

pub use bump::{BumpError, BumpOptions, BumpOutcome, bump};

/// Matches `[assembly: AssemblyVersion("1.2.3.4")]`.
///
/// Group 1 is the full version, groups 2-5 are its components.
pub const ASSEMBLY_VERSION_PATTERN: &str = r#"\[assembly: AssemblyVersion\("((\d+)\.(\d+)\.(\d+)\.(\d+))"\)\]"#;

/// Matches `[assembly: AssemblyFileVersion("1.2.3.4")]`, grouped like [`ASSEMBLY_VERSION_PATTERN`].
pub const ASSEMBLY_FILE_VERSION_PATTERN: &str =
  r#"\[assembly: AssemblyFileVersion\("((\d+)\.(\d+)\.(\d+)\.(\d+))"\)\]"#;

/// Errors from version extraction and substitution.
#[derive(Debug, Error)]
pub enum VersionError {
  #[error("invalid regex '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("regex '{pattern}' has no capture group for the version")]
  MissingCaptureGroup { pattern: String },

  #[error("version not found using '{pattern}'")]
  NotFound { pattern: String },

  #[error("invalid replacement template '{template}': {message}")]
  Template { template: String, message: String },

  #[error("invalid assembly version '{0}'")]
  InvalidVersion(String),
}

/// The result of a successful version search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMatch {
  /// Entire text matched by the pattern.
  pub info: String,
  /// Pattern used for the search.
  pub pattern: String,
  /// Text of the first capture group.
  pub version: String,
}

/// Search `text` for `pattern` in multi-line mode.
///
/// The pattern must define at least one capture group. A first group that did
/// not participate in the match yields an empty version.
pub fn extract(text: &str, pattern: &str) -> Result<VersionMatch, VersionError> {
  let regex = RegexBuilder::new(pattern)
    .multi_line(true)
    .build()
    .map_err(|source| VersionError::InvalidPattern {
      pattern: pattern.to_string(),
      source,
    })?;

  if regex.captures_len() < 2 {
    return Err(VersionError::MissingCaptureGroup {
      pattern: pattern.to_string(),
    });
  }

  let caps = regex.captures(text).ok_or_else(|| VersionError::NotFound {
    pattern: pattern.to_string(),
  })?;

  Ok(VersionMatch {
    info: caps[0].to_string(),
    pattern: pattern.to_string(),
    version: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
  })
}

/// Replace every match of `pattern` in `text` with `template`.
///
/// `template` uses Python `re.sub` syntax: `\1`..`\99`, `\g<1>`, `\g<name>`,
/// and the escapes `\\`, `\n`, `\r`, `\t`, `\a`, `\b`, `\f`, `\v`. An empty
/// pattern matches the empty string, so substituting into empty text yields
/// the template itself.
///
/// An empty match directly after a non-empty one is replaced too, so `(\d*)`
/// against `12` yields two replacements. A second empty match at the same
/// position is skipped.
pub fn substitute(pattern: &str, template: &str, text: &str) -> Result<String, VersionError> {
  let regex = compile(pattern)?;
  let replacement = template::translate(template, &regex)?;

  let mut out = String::with_capacity(text.len());
  let mut copied = 0;
  let mut pos = 0;
  let mut last_empty_at = None;

  while pos <= text.len() {
    let Some(caps) = regex.captures_at(text, pos) else {
      break;
    };
    let Some(m) = caps.get(0) else {
      break;
    };

    if m.is_empty() && last_empty_at == Some(m.start()) {
      match text[m.start()..].chars().next() {
        Some(ch) => {
          pos = m.start() + ch.len_utf8();
          continue;
        }
        None => break,
      }
    }

    out.push_str(&text[copied..m.start()]);
    caps.expand(&replacement, &mut out);
    copied = m.end();
    pos = m.end();
    last_empty_at = m.is_empty().then_some(m.start());
  }

  out.push_str(&text[copied..]);
  Ok(out)
}

fn compile(pattern: &str) -> Result<Regex, VersionError> {
  Regex::new(pattern).map_err(|source| VersionError::InvalidPattern {
    pattern: pattern.to_string(),
    source,
  })
}

/// A four-part `major.minor.patch.build` assembly version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AssemblyVersion {
  pub major: u32,
  pub minor: u32,
  pub patch: u32,
  pub build: u32,
}

impl AssemblyVersion {
  pub fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
    Self {
      major,
      minor,
      patch,
      build,
    }
  }

  /// Next patch release: patch incremented, build reset to zero.
  ///
  /// Fails when the patch number is already at its maximum.
  pub fn bump_patch(self) -> Result<Self, VersionError> {
    let patch = self
      .patch
      .checked_add(1)
      .ok_or_else(|| VersionError::InvalidVersion(format!("{self} (patch overflows)")))?;
    Ok(Self { patch, build: 0, ..self })
  }
}

impl fmt::Display for AssemblyVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
  }
}

impl FromStr for AssemblyVersion {
  type Err = VersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let parts: Vec<u32> = s
      .split('.')
      .map(|part| part.parse::<u32>())
      .collect::<Result<_, _>>()
      .map_err(|_| VersionError::InvalidVersion(s.to_string()))?;

    match parts.as_slice() {
      [major, minor, patch, build] => Ok(Self::new(*major, *minor, *patch, *build)),
      _ => Err(VersionError::InvalidVersion(s.to_string())),
    }
  }
}
