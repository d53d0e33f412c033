//! Version bump, commit message and CSV tools working on real files.

use std::path::PathBuf;

use relkit_lib::commit_msg::prepend_version;
use relkit_lib::csv_sql::{CsvSqlOptions, convert};
use relkit_lib::version::{AssemblyVersion, BumpOptions, bump};

use super::common::Workspace;

const ASSEMBLY_INFO: &str = r#"using System.Reflection;

[assembly: AssemblyTitle("CCTM")]
[assembly: AssemblyVersion("4.2.11.0")]
[assembly: AssemblyFileVersion("4.2.11.0")]
"#;

#[test]
fn bump_then_tag_commit_message() {
  let ws = Workspace::new();
  ws.write("RTCC/Properties/AssemblyInfo.cs", ASSEMBLY_INFO);
  ws.write("CCTM/Properties/AssemblyInfo.cs", ASSEMBLY_INFO);
  ws.write("COMMIT_EDITMSG", "Handle declined refunds\n");

  let outcome = bump(&BumpOptions {
    files: vec![
      PathBuf::from("RTCC/Properties/AssemblyInfo.cs"),
      PathBuf::from("CCTM/Properties/AssemblyInfo.cs"),
    ],
    work_dir: ws.path().to_path_buf(),
    ..Default::default()
  })
  .unwrap();
  assert_eq!(outcome.next, AssemblyVersion::new(4, 2, 12, 0));

  let tag = prepend_version(
    &ws.path().join("CCTM/Properties/AssemblyInfo.cs"),
    &ws.path().join("COMMIT_EDITMSG"),
  )
  .unwrap();

  assert_eq!(tag.as_deref(), Some("4.2.12.0;"));
  assert_eq!(ws.read("COMMIT_EDITMSG"), "4.2.12.0;\nHandle declined refunds\n");
  assert!(ws.read("RTCC/Properties/AssemblyInfo.cs").contains("AssemblyFileVersion(\"4.2.12.0\")"));
}

#[test]
fn convert_export_with_default_columns() {
  let ws = Workspace::new();
  let headings: Vec<String> = (0..26).map(|i| format!("C{i}")).collect();
  let row: Vec<String> = (0..26)
    .map(|i| if i == 8 { "NULL".to_string() } else { format!("v{i}") })
    .collect();
  ws.write("Book1.csv", &format!("{}\n{}\n", headings.join("\t"), row.join("\t")));

  let rows = convert(
    &ws.path().join("Book1.csv"),
    &ws.path().join("Formatted.sql"),
    &CsvSqlOptions::default(),
  )
  .unwrap();

  assert_eq!(rows, 1);
  let sql = ws.read("Formatted.sql");
  assert!(sql.starts_with("insert into TransactionRecord (C0, C1,"));
  assert!(sql.contains("(v0, v1, v2, 'v3', v4,"));
  assert!(sql.contains(", NULL, 'v9',"));
  assert!(sql.ends_with(", 'v25')"));
}
