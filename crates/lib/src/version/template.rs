//! Translation of Python replacement templates into `regex` replacement syntax.

use regex::Regex;

use super::VersionError;

/// Translate a Python-style template into a `regex` replacement string.
///
/// Group references are checked against `regex` so that a reference to a
/// group it doesn't define fails instead of expanding to nothing.
pub(super) fn translate(template: &str, regex: &Regex) -> Result<String, VersionError> {
  let fail = |message: String| VersionError::Template {
    template: template.to_string(),
    message,
  };

  let mut out = String::with_capacity(template.len() + 8);
  let mut chars = template.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '$' => out.push_str("$$"),
      '\\' => match chars.next() {
        None => return Err(fail("trailing backslash".to_string())),
        Some('\\') => out.push('\\'),
        Some('n') => out.push('\n'),
        Some('r') => out.push('\r'),
        Some('t') => out.push('\t'),
        Some('a') => out.push('\x07'),
        Some('b') => out.push('\x08'),
        Some('f') => out.push('\x0c'),
        Some('v') => out.push('\x0b'),
        Some(d @ '1'..='9') => {
          let mut digits = d.to_string();
          if let Some(next) = chars.next_if(|ch| ch.is_ascii_digit()) {
            digits.push(next);
          }
          let index: usize = digits.parse().map_err(|_| fail(format!("bad group \\{digits}")))?;
          push_index(&mut out, index, regex).map_err(fail)?;
        }
        Some('0') => return Err(fail("octal escapes are not supported".to_string())),
        Some('g') => {
          if chars.next() != Some('<') {
            return Err(fail("expected '<' after \\g".to_string()));
          }
          let mut group = String::new();
          loop {
            match chars.next() {
              Some('>') => break,
              Some(ch) => group.push(ch),
              None => return Err(fail("unterminated \\g<...>".to_string())),
            }
          }
          if group.is_empty() {
            return Err(fail("empty group name".to_string()));
          }
          match group.parse::<usize>() {
            Ok(index) => push_index(&mut out, index, regex).map_err(fail)?,
            Err(_) => push_name(&mut out, &group, regex).map_err(fail)?,
          }
        }
        Some(other) if other.is_ascii_alphabetic() => {
          return Err(fail(format!("bad escape \\{other}")));
        }
        Some(other) => {
          out.push('\\');
          out.push(other);
        }
      },
      other => out.push(other),
    }
  }

  Ok(out)
}

fn push_index(out: &mut String, index: usize, regex: &Regex) -> Result<(), String> {
  if index >= regex.captures_len() {
    return Err(format!("invalid group reference {index}"));
  }
  out.push_str(&format!("${{{index}}}"));
  Ok(())
}

fn push_name(out: &mut String, name: &str, regex: &Regex) -> Result<(), String> {
  if !regex.capture_names().flatten().any(|n| n == name) {
    return Err(format!("unknown group name '{name}'"));
  }
  out.push_str(&format!("${{{name}}}"));
  Ok(())
}
