//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the CLI tool,
//! following behavior-driven testing principles.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

/// Helper to create a command for the cstlint CLI running in `dir`
fn cstlint_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cstlint"));
    cmd.current_dir(dir);
    cmd
}

const CONFIG: &str = r#"{
    "checks": [
        { "name": "DuplicateKeyProperty" },
        { "name": "EmptyContentXml", "severity": "warning" }
    ]
}"#;

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".cstlint.json"), CONFIG).unwrap();
    fs::write(dir.path().join("clean.properties"), "a=1\nb=2\n").unwrap();
    fs::write(dir.path().join("dup.properties"), "a=1\na=2\n").unwrap();
    fs::write(dir.path().join("empty.xml"), "<root></root>\n").unwrap();
    dir
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        let dir = tempdir().unwrap();
        cstlint_cmd(dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        let dir = tempdir().unwrap();
        cstlint_cmd(dir.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod lint_command {
    use super::*;

    #[test]
    fn clean_file_succeeds() {
        let dir = workspace();
        cstlint_cmd(dir.path())
            .args(["lint", "clean.properties"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 1 files, found 0 issues"));
    }

    #[test]
    fn error_violation_fails() {
        let dir = workspace();
        cstlint_cmd(dir.path())
            .args(["lint", "dup.properties"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "2:1 error [DuplicateKeyProperty]: Duplicate key 'a'.",
            ));
    }

    #[test]
    fn warnings_alone_succeed() {
        let dir = workspace();
        cstlint_cmd(dir.path())
            .args(["lint", "empty.xml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("warning [EmptyContentXml]"));
    }

    #[test]
    fn glob_patterns_are_expanded() {
        let dir = workspace();
        cstlint_cmd(dir.path())
            .args(["lint", "**/*.properties"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Checked 2 files"));
    }

    #[test]
    fn reports_zero_files_for_nonexistent_path() {
        let dir = workspace();
        cstlint_cmd(dir.path())
            .args(["lint", "nonexistent_file.properties"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 0 files"));
    }

    #[test]
    fn json_output() {
        let dir = workspace();
        let output = cstlint_cmd(dir.path())
            .args(["lint", "dup.properties", "--format", "json"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let violation = &json[0]["violations"][0];
        assert_eq!(violation["line"], 2);
        assert_eq!(violation["column"], 1);
        assert_eq!(violation["severity"], "error");
        assert_eq!(violation["check"], "DuplicateKeyProperty");
        assert_eq!(violation["token"], "KEY");
        assert_eq!(violation["message"], "Duplicate key 'a'.");
    }

    #[test]
    fn explicit_config_flag() {
        let dir = workspace();
        fs::write(
            dir.path().join("strict.json"),
            r#"{ "checks": [{ "name": "OrderedKeyProperty" }] }"#,
        )
        .unwrap();
        fs::write(dir.path().join("unordered.properties"), "b=1\na=2\n").unwrap();
        cstlint_cmd(dir.path())
            .args(["--config", "strict.json", "lint", "unordered.properties"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("[OrderedKeyProperty]"));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let dir = workspace();
        fs::write(
            dir.path().join(".cstlint.json"),
            r#"{ "checks": [{ "name": "NoSuchCheck" }] }"#,
        )
        .unwrap();
        cstlint_cmd(dir.path())
            .args(["lint", "clean.properties"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Unknown check 'NoSuchCheck'"));
    }

    #[test]
    fn broken_file_fails_without_hiding_others() {
        let dir = workspace();
        fs::write(dir.path().join("broken.xml"), "<root>").unwrap();
        cstlint_cmd(dir.path())
            .args(["lint", "broken.xml", "clean.properties"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Checked 1 files"))
            .stderr(predicate::str::contains("1 file(s) failed to lint"));
    }
}

mod tree_command {
    use super::*;

    #[test]
    fn prints_property_tree() {
        let dir = workspace();
        cstlint_cmd(dir.path())
            .args(["tree", "clean.properties"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("FILE -> FILE [1:0]\n|--ROW -> ROW [1:0]"));
    }

    #[test]
    fn prints_xml_tree() {
        let dir = workspace();
        cstlint_cmd(dir.path())
            .args(["tree", "empty.xml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("|   |--OPEN -> < [1:0]"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = workspace();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        cstlint_cmd(dir.path())
            .args(["tree", "notes.txt"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Unsupported file type"));
    }
}
