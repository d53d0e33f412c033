//! Shared helpers for library tests.

use std::fs::File;
use std::path::Path;

use tempfile::TempDir;
use zip::ZipArchive;

/// A scratch working directory with files written into it.
pub struct Workspace {
  pub temp: TempDir,
}

impl Workspace {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the workspace, creating parent directories.
  pub fn write(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path)).unwrap()
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.temp.path().join(relative_path).exists()
  }
}

/// Entry names of a zip archive in stored order.
pub fn archive_entries(path: &Path) -> Vec<String> {
  let mut zip = ZipArchive::new(File::open(path).unwrap()).unwrap();
  (0..zip.len())
    .map(|i| zip.by_index(i).unwrap().name().to_string())
    .collect()
}
