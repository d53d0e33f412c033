//! Implementation of the `relkit bump` command.
//!
//! Increments the patch version in the given version-metadata files and runs
//! the rebuild commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use relkit_lib::consts::DEFAULT_VERSION_FILES;
use relkit_lib::version::{BumpOptions, bump};

use crate::output::{OutputFormat, print_json, print_stat, print_success, print_warning, symbols};

/// Execute the bump command.
///
/// # Arguments
///
/// * `files` - Version files to rewrite. If empty, the default pair is used.
/// * `build` - Commands run after the files are written, in order.
/// * `dry_run` - If true, show the new version without writing or building.
pub fn cmd_bump(files: Vec<PathBuf>, build: Vec<String>, dry_run: bool, output: OutputFormat) -> Result<()> {
  let files = if files.is_empty() {
    DEFAULT_VERSION_FILES.iter().map(PathBuf::from).collect()
  } else {
    files
  };

  let options = BumpOptions {
    files,
    build_commands: build,
    dry_run,
    work_dir: PathBuf::from("."),
  };

  let outcome = bump(&options).context("Failed to bump version")?;

  if output.is_json() {
    return print_json(&outcome);
  }

  if outcome.mismatched {
    print_warning("Versions don't match across files, using the first one");
  }

  if dry_run {
    println!("{}", "Dry run - no changes written".yellow());
  } else {
    print_success("Version bumped!");
  }
  println!(
    "  {} {} {} {}",
    symbols::INFO.cyan(),
    outcome.previous.to_string().dimmed(),
    symbols::ARROW,
    outcome.next.to_string().green()
  );
  for file in &outcome.files {
    print_stat("File", &file.display().to_string());
  }
  for cmd in &outcome.commands_run {
    print_stat("Built", cmd);
  }

  Ok(())
}
