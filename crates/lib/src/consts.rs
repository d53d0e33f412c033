//! Well-known file names and defaults.

/// Manifest read by `relkit deploy` when no path is given.
pub const MANIFEST_FILENAME: &str = "deploy-files.txt";

/// Archive name used until a `filename=` directive overrides it.
pub const DEFAULT_ARCHIVE_NAME: &str = "deploy";

/// `copy-to` value meaning "leave the archive where it is".
pub const CURRENT_DIR: &str = ".";

/// Version-metadata files rewritten by `relkit bump` when none are given.
pub const DEFAULT_VERSION_FILES: &[&str] = &["RTCC/Properties/AssemblyInfo.cs", "CCTM/Properties/AssemblyInfo.cs"];

/// Version-metadata file read by `relkit commit-msg`.
pub const DEFAULT_COMMIT_VERSION_FILE: &str = "CCTM/Properties/AssemblyInfo.cs";

pub const DEFAULT_CSV_INPUT: &str = "Book1.csv";
pub const DEFAULT_SQL_OUTPUT: &str = "Formatted.sql";
pub const DEFAULT_SQL_TABLE: &str = "TransactionRecord";

/// Zero-based columns wrapped in quotes by `relkit csv-sql` by default.
pub const DEFAULT_QUOTE_COLUMNS: &[usize] = &[3, 8, 9, 13, 14, 15, 18, 19, 25];
