use std::path::Path;

use anyhow::{Context, Result};

use relkit_lib::consts::DEFAULT_QUOTE_COLUMNS;
use relkit_lib::csv_sql::{CsvSqlOptions, convert};

use crate::output::{print_stat, print_success};

pub fn cmd_csv_sql(input: &Path, output: &Path, table: String, quote_columns: Option<Vec<usize>>) -> Result<()> {
  let options = CsvSqlOptions {
    table,
    quote_columns: quote_columns.unwrap_or_else(|| DEFAULT_QUOTE_COLUMNS.to_vec()),
  };

  let rows = convert(input, output, &options)
    .with_context(|| format!("Failed to convert {}", input.display()))?;

  print_success("SQL written!");
  print_stat("Rows", &rows.to_string());
  print_stat("Output", &output.display().to_string());

  Ok(())
}
