//! Deploy command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, archive_entries};

#[test]
fn versioned_archive_is_named_from_version() {
  let env = TestEnv::with_manifest("version=ver.txt=VER (\\d+\\.\\d+)\nfilename=app-\\1.zip\nreadme.txt\n");
  env.write_file("ver.txt", "VER 2.5\n");
  env.write_file("readme.txt", "hello");

  env
    .relkit_cmd()
    .arg("deploy")
    .assert()
    .success()
    .stdout(predicate::str::contains("version=2.5"))
    .stdout(predicate::str::contains("filename=app-2.5.zip"))
    .stdout(predicate::str::contains("Zipping file readme.txt"))
    .stdout(predicate::str::contains("Archive complete"));

  assert_eq!(archive_entries(&env.path("app-2.5.zip")), vec!["readme.txt"]);
}

#[test]
fn filename_after_file_exits_with_status_one() {
  let env = TestEnv::with_manifest("a.txt\nfilename=late.zip\n");
  env.write_file("a.txt", "a");

  env
    .relkit_cmd()
    .arg("deploy")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("filename needs to be specified before any files"))
    .stderr(predicate::str::contains("filename needs").not());

  assert!(!env.path("late.zip").exists());
}

#[test]
fn version_not_found_exits_with_status_one() {
  let env = TestEnv::with_manifest("version=ver.txt=VER (\\d+)\na.txt\n");
  env.write_file("ver.txt", "nope");
  env.write_file("a.txt", "a");

  env
    .relkit_cmd()
    .arg("deploy")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("Version not found in file"))
    .stderr(predicate::str::contains("Version not found").not());

  assert!(!env.path("deploy").exists());
}

#[test]
fn missing_file_error_goes_to_stderr() {
  let env = TestEnv::with_manifest("missing.txt\n");

  env
    .relkit_cmd()
    .arg("deploy")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn copy_to_archive_itself_warns_and_keeps_archive() {
  let env = TestEnv::with_manifest("copy-to=.//\na.txt\n");
  env.write_file("a.txt", "a");

  env
    .relkit_cmd()
    .arg("deploy")
    .assert()
    .success()
    .stderr(predicate::str::contains("copy destination is the archive itself"))
    .stdout(predicate::str::contains("Copied to").not());

  assert_eq!(archive_entries(&env.path("deploy")), vec!["a.txt"]);
}

#[test]
fn manifest_without_files_creates_nothing() {
  let env = TestEnv::with_manifest("copy-to=out\n");

  env
    .relkit_cmd()
    .arg("deploy")
    .assert()
    .success()
    .stdout(predicate::str::contains("archive not created"));

  assert!(!env.path("deploy").exists());
}

#[test]
fn copy_to_reports_and_copies() {
  let env = TestEnv::with_manifest("copy-to=drop\na.txt\n");
  env.write_file("a.txt", "a");
  std::fs::create_dir(env.path("drop")).unwrap();

  env
    .relkit_cmd()
    .arg("deploy")
    .assert()
    .success()
    .stdout(predicate::str::contains("copy-to=drop"))
    .stdout(predicate::str::contains("Copied to"));

  assert_eq!(
    std::fs::read(env.path("deploy")).unwrap(),
    std::fs::read(env.path("drop/deploy")).unwrap()
  );
}

#[test]
fn custom_manifest_and_directory() {
  let env = TestEnv::empty();
  env.write_file("project/files.lst", "a.txt\n");
  env.write_file("project/a.txt", "a");

  env
    .relkit_cmd()
    .args(["deploy", "--manifest", "files.lst", "-C", "project"])
    .assert()
    .success();

  assert_eq!(archive_entries(&env.path("project/deploy")), vec!["a.txt"]);
}

#[test]
fn json_output_describes_outcome() {
  let env = TestEnv::with_manifest("filename=out.zip\na.txt\n");
  env.write_file("a.txt", "a");

  let output = env
    .relkit_cmd()
    .args(["--format", "json", "deploy"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(value["entries"], serde_json::json!(["a.txt"]));
  assert_eq!(value["env"]["archive_name"], "out.zip");
}
