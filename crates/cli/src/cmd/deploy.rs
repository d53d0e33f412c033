//! Implementation of the `relkit deploy` command.
//!
//! Interprets a deploy manifest and assembles the deploy archive, printing
//! each step as it happens.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use relkit_lib::deploy::{DeployOptions, run};

use crate::output::{OutputFormat, format_bytes, format_duration, print_info, print_json, print_stat, print_step, print_success};

/// Execute the deploy command.
///
/// Reads `manifest` (relative to `dir`) and processes it line by line. In text
/// mode every directive prints a progress line; in JSON mode only the final
/// outcome is printed.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, a version cannot be found,
/// `filename=` follows a file, a command fails, or an included file is missing.
pub fn cmd_deploy(manifest: PathBuf, dir: PathBuf, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let options = DeployOptions {
    manifest,
    work_dir: dir,
  };

  let outcome = run(&options, |event| {
    if !output.is_json() {
      print_step(&event.to_string());
    }
  })
  .context("Deploy failed")?;

  if output.is_json() {
    return print_json(&outcome);
  }

  println!();
  match &outcome.archive {
    Some(archive) => {
      info!(path = %archive.display(), "archive saved");
      print_success("Archive complete!");
      print_stat("Archive", &archive.display().to_string());
      print_stat("Files", &outcome.entries.len().to_string());
      if let Ok(metadata) = std::fs::metadata(archive) {
        print_stat("Size", &format_bytes(metadata.len()));
      }
      if let Some(copy) = &outcome.copied_to {
        print_stat("Copied to", &copy.display().to_string());
      }
    }
    None => print_info("No files listed, archive not created"),
  }
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
