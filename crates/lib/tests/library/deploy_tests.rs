//! Deploy manifest interpretation, end to end.

use relkit_lib::deploy::{DeployError, DeployOptions, run};

use super::common::{Workspace, archive_entries};

fn deploy(ws: &Workspace, manifest: &str) -> Result<relkit_lib::deploy::DeployOutcome, DeployError> {
  ws.write("deploy-files.txt", manifest);
  let options = DeployOptions {
    work_dir: ws.path().to_path_buf(),
    ..Default::default()
  };
  run(&options, |_| {})
}

#[test]
fn versioned_archive_scenario() {
  let ws = Workspace::new();
  ws.write("ver.txt", "VER 2.5");
  ws.write("readme.txt", "read me");

  let outcome = deploy(&ws, "version=ver.txt=VER (\\d+\\.\\d+)\nfilename=app-\\1.zip\nreadme.txt\n").unwrap();

  assert_eq!(outcome.env.version, "2.5");
  assert!(ws.exists("app-2.5.zip"));
  assert!(!ws.exists("deploy"));
  assert_eq!(archive_entries(&ws.path().join("app-2.5.zip")), vec!["readme.txt"]);
}

#[test]
fn plain_manifest_uses_default_name_and_order() {
  let ws = Workspace::new();
  ws.write("bin/app.exe", "MZ");
  ws.write("bin/app.exe.config", "<configuration/>");
  ws.write("notes.txt", "notes");

  deploy(&ws, "notes.txt\nbin/app.exe\nbin/app.exe.config\n").unwrap();

  assert_eq!(
    archive_entries(&ws.path().join("deploy")),
    vec!["notes.txt", "bin/app.exe", "bin/app.exe.config"]
  );
}

#[test]
fn filename_after_files_keeps_existing_name() {
  let ws = Workspace::new();
  ws.write("a.txt", "a");

  let err = deploy(&ws, "a.txt\nfilename=renamed.zip\n").unwrap_err();

  assert!(err.is_documented());
  assert!(!ws.exists("renamed.zip"));
}

#[test]
fn unmatched_version_creates_nothing() {
  let ws = Workspace::new();
  ws.write("ver.txt", "no version here");
  ws.write("a.txt", "a");

  let err = deploy(&ws, "version=ver.txt=VER (\\d+)\nfilename=app-\\1.zip\na.txt\n").unwrap_err();

  assert!(matches!(err, DeployError::VersionNotFound { .. }));
  assert!(!ws.exists("deploy"));
  assert!(!ws.exists("app-.zip"));
}

#[test]
fn empty_manifest_creates_no_archive() {
  let ws = Workspace::new();

  let outcome = deploy(&ws, "\n\n").unwrap();

  assert!(outcome.archive.is_none());
  assert!(!ws.exists("deploy"));
}

#[test]
fn copy_to_produces_identical_copy() {
  let ws = Workspace::new();
  ws.write("a.txt", "alpha");
  std::fs::create_dir(ws.path().join("share")).unwrap();

  deploy(&ws, "copy-to=share\na.txt\n").unwrap();

  let original = std::fs::read(ws.path().join("deploy")).unwrap();
  let copy = std::fs::read(ws.path().join("share").join("deploy")).unwrap();
  assert_eq!(original, copy);
}

#[test]
fn captured_output_is_written_and_archived() {
  let ws = Workspace::new();

  let outcome = deploy(&ws, "filename=out.zip\nstamp.txt=echo stamped\n").unwrap();

  assert_eq!(ws.read("stamp.txt").trim_end(), "stamped");
  assert_eq!(outcome.entries, vec!["stamp.txt"]);
  assert_eq!(archive_entries(&ws.path().join("out.zip")), vec!["stamp.txt"]);
}

#[test]
fn capture_overwrites_existing_file() {
  let ws = Workspace::new();
  ws.write("stamp.txt", "old contents that are longer than the new ones");

  deploy(&ws, "stamp.txt=echo new\n").unwrap();

  assert_eq!(ws.read("stamp.txt").trim_end(), "new");
}
