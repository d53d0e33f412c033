mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relkit_lib::consts::{
  CURRENT_DIR, DEFAULT_COMMIT_VERSION_FILE, DEFAULT_CSV_INPUT, DEFAULT_SQL_OUTPUT, DEFAULT_SQL_TABLE, MANIFEST_FILENAME,
};
use relkit_lib::deploy::DeployError;

use cmd::{cmd_bump, cmd_commit_msg, cmd_csv_sql, cmd_deploy};
use output::{OutputFormat, print_error};

/// relkit - release packaging and versioning helpers
#[derive(Parser)]
#[command(name = "relkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Defaults to `deploy` when omitted
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Assemble the deploy archive described by a manifest
  Deploy {
    /// Manifest to interpret
    #[arg(short, long, env = "RELKIT_MANIFEST", default_value = MANIFEST_FILENAME)]
    manifest: PathBuf,

    /// Directory the manifest's paths and commands are relative to
    #[arg(short = 'C', long, default_value = CURRENT_DIR)]
    dir: PathBuf,
  },

  /// Increment the patch version in assembly info files and rebuild
  Bump {
    /// Version files to rewrite; the first one is authoritative
    files: Vec<PathBuf>,

    /// Command to run after rewriting (repeatable)
    #[arg(short, long = "build")]
    build: Vec<String>,

    /// Show the new version without writing or building
    #[arg(long)]
    dry_run: bool,
  },

  /// Prefix a commit message file with the current version
  CommitMsg {
    /// Commit message file, as passed by git
    message_file: PathBuf,

    /// Assembly info file holding the version
    #[arg(long, env = "RELKIT_VERSION_FILE", default_value = DEFAULT_COMMIT_VERSION_FILE)]
    version_file: PathBuf,
  },

  /// Convert a tab-separated export into a SQL insert statement
  CsvSql {
    /// Tab-separated input file
    #[arg(short, long, default_value = DEFAULT_CSV_INPUT)]
    input: PathBuf,

    /// SQL output file
    #[arg(short, long, default_value = DEFAULT_SQL_OUTPUT)]
    output: PathBuf,

    /// Table to insert into
    #[arg(short, long, default_value = DEFAULT_SQL_TABLE)]
    table: String,

    /// Zero-based columns to quote, comma separated
    #[arg(short, long, value_delimiter = ',')]
    quote_columns: Option<Vec<usize>>,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  // Initialize logging
  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      // Manifest mistakes are reported on stdout alongside the progress lines.
      match err.downcast_ref::<DeployError>() {
        Some(deploy) if deploy.is_documented() => println!("{deploy}"),
        _ => print_error(&format!("{:#}", err)),
      }
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    None => cmd_deploy(PathBuf::from(MANIFEST_FILENAME), PathBuf::from(CURRENT_DIR), cli.format),
    Some(Commands::Deploy { manifest, dir }) => cmd_deploy(manifest, dir, cli.format),
    Some(Commands::Bump { files, build, dry_run }) => cmd_bump(files, build, dry_run, cli.format),
    Some(Commands::CommitMsg {
      message_file,
      version_file,
    }) => cmd_commit_msg(&message_file, &version_file),
    Some(Commands::CsvSql {
      input,
      output,
      table,
      quote_columns,
    }) => cmd_csv_sql(&input, &output, table, quote_columns),
  }
}
