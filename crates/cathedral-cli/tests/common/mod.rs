#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a `cathedral` command pointed at `root`, isolated from the caller's
/// environment.
#[allow(dead_code)]
pub fn cathedral_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cathedral"));
    cmd.timeout(CMD_TIMEOUT);
    for key in [
        "CATHEDRAL_CONFIG",
        "CATHEDRAL_ROOT",
        "CATHEDRAL_BUNDLE_NAME",
        "CATHEDRAL_OUTPUT_DIR",
        "CATHEDRAL_OUTPUT_FORMAT",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd.arg("--root").arg(root);
    cmd
}

/// Write `content` to `root/rel`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, content).expect("write fixture");
}

/// Read and parse a JSON file.
#[allow(dead_code)]
pub fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("parse json")
}
