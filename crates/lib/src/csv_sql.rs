//! Tab-separated spreadsheet export to a SQL insert statement.
//!
//! The first line holds the column headings. Every following line becomes one
//! row of a single multi-row `insert ... values` statement.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::consts::{DEFAULT_QUOTE_COLUMNS, DEFAULT_SQL_TABLE};

#[derive(Debug, Clone)]
pub struct CsvSqlOptions {
  /// Target table name.
  pub table: String,
  /// Zero-based column indices whose values are quoted as strings.
  pub quote_columns: Vec<usize>,
}

impl Default for CsvSqlOptions {
  fn default() -> Self {
    Self {
      table: DEFAULT_SQL_TABLE.to_string(),
      quote_columns: DEFAULT_QUOTE_COLUMNS.to_vec(),
    }
  }
}

#[derive(Debug, Error)]
pub enum CsvSqlError {
  #[error("input has no heading line")]
  MissingHeader,

  #[error("line {line} has no column {column}")]
  MissingField { line: usize, column: usize },

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Format tab-separated `input` as an insert statement.
pub fn format_sql(input: &str, options: &CsvSqlOptions) -> Result<String, CsvSqlError> {
  let mut lines = input.lines();
  let header = lines.next().filter(|l| !l.trim().is_empty()).ok_or(CsvSqlError::MissingHeader)?;
  let headings: Vec<&str> = header.split('\t').map(str::trim).collect();

  let mut rows = Vec::new();
  for (idx, line) in lines.enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    let mut fields: Vec<String> = line.split('\t').map(|f| f.trim().to_string()).collect();
    for &column in &options.quote_columns {
      let field = fields.get_mut(column).ok_or(CsvSqlError::MissingField {
        // one-based, counting the heading line
        line: idx + 2,
        column,
      })?;
      *field = quote(field);
    }
    rows.push(format!("({})", fields.join(", ")));
  }

  Ok(format!(
    "insert into {} ({}) values\n{}",
    options.table,
    headings.join(", "),
    rows.join(",\n")
  ))
}

/// Read `input`, format it and write the statement to `output`.
///
/// Returns the number of rows written.
pub fn convert(input: &Path, output: &Path, options: &CsvSqlOptions) -> Result<usize, CsvSqlError> {
  let text = fs::read_to_string(input).map_err(|source| CsvSqlError::Read {
    path: input.to_path_buf(),
    source,
  })?;
  let sql = format_sql(&text, options)?;
  let rows = sql.lines().skip(1).count();

  fs::write(output, sql).map_err(|source| CsvSqlError::Write {
    path: output.to_path_buf(),
    source,
  })?;

  info!(rows, path = %output.display(), "wrote sql");
  Ok(rows)
}

fn quote(value: &str) -> String {
  if value.eq_ignore_ascii_case("null") {
    value.to_string()
  } else {
    format!("'{value}'")
  }
}
