//! Shared test helpers for CLI integration tests.

use std::fs::File;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;
use zip::ZipArchive;

/// Isolated test environment.
///
/// Each test gets its own temporary working directory; the binary runs with
/// that directory as its current directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty test environment.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Create an environment whose `deploy-files.txt` holds `manifest`.
  pub fn with_manifest(manifest: &str) -> Self {
    let env = Self::empty();
    env.write_file("deploy-files.txt", manifest);
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.path(relative_path)).unwrap()
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Get a Command for the relkit binary running inside the test directory.
  ///
  /// `RUST_LOG` is cleared so log output can't leak into assertions.
  pub fn relkit_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("relkit");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("RELKIT_MANIFEST");
    cmd.env_remove("RELKIT_VERSION_FILE");
    cmd
  }
}

/// Entry names of a zip archive in stored order.
pub fn archive_entries(path: &Path) -> Vec<String> {
  let mut zip = ZipArchive::new(File::open(path).unwrap()).unwrap();
  (0..zip.len())
    .map(|i| zip.by_index(i).unwrap().name().to_string())
    .collect()
}
