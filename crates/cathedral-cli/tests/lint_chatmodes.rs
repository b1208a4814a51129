#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{cathedral_cmd, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

const COMPLIANT: &str = "# Mode\nfocused\n## Source\ndocs\n## Style\nterse\n## Refusal\npolite\n";

#[test]
fn compliant_chatmode_passes() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), ".github/chatmodes/guide.chatmode.md", COMPLIANT);

    cathedral_cmd(tmp.path())
        .arg("lint")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chatmode lint: OK"));
}

#[test]
fn missing_refusal_section_exits_two() {
    let tmp = tempdir().unwrap();
    write_file(
        tmp.path(),
        ".github/chatmodes/guide.chatmode.md",
        "# Mode\n## Source\n## Style\n",
    );

    cathedral_cmd(tmp.path())
        .arg("lint")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Chatmode lint issues:"))
        .stderr(predicate::str::is_match("guide\\.chatmode\\.md.*Refusal").unwrap());
}

#[test]
fn all_files_are_reported() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), ".github/chatmodes/a.chatmode.md", "# Mode\n");
    let oversized = format!("{COMPLIANT}{}", "x".repeat(12_001));
    write_file(tmp.path(), ".github/chatmodes/b.chatmode.md", &oversized);
    write_file(tmp.path(), ".github/chatmodes/notes.md", "ignored");

    cathedral_cmd(tmp.path())
        .arg("lint")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("a.chatmode.md: missing section containing 'Source'"))
        .stderr(predicate::str::contains("b.chatmode.md: file too large"))
        .stderr(predicate::str::contains("notes.md").not());
}

#[test]
fn missing_directory_is_not_an_error() {
    let tmp = tempdir().unwrap();

    cathedral_cmd(tmp.path())
        .arg("lint")
        .assert()
        .success()
        .stdout(predicate::str::contains("No chatmodes directory"));
}

#[test]
fn json_report_and_custom_dir() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), "modes/x.chatmode.md", "# Mode\n# Source\n# Style\n");

    let assert = cathedral_cmd(tmp.path())
        .args(["lint", "-f", "json", "--dir"])
        .arg(tmp.path().join("modes"))
        .assert()
        .code(2);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["directoryFound"], true);
    assert_eq!(report["filesChecked"], 1);
    assert_eq!(report["issues"][0]["file"], "x.chatmode.md");
    assert_eq!(report["issues"][0]["kind"], "missing_section");
    assert_eq!(report["issues"][0]["section"], "Refusal");
}

#[test]
fn configured_sections_replace_defaults() {
    let tmp = tempdir().unwrap();
    write_file(
        tmp.path(),
        "cathedral.toml",
        "[lint]\nrequired_sections = [\"Purpose\"]\n",
    );
    write_file(tmp.path(), ".github/chatmodes/p.chatmode.md", "## purpose\n");

    cathedral_cmd(tmp.path())
        .arg("lint")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chatmode lint: OK"));
}
