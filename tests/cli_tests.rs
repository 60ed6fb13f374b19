use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test utilities for driving the binary
mod test_utils {
    use super::*;

    pub const CATALOG: &str = r#"
[[clips]]
id = "beach"
url = "https://cdn.example/beach.mp4"
name = "Beach"
owner_id = "owner-7"
aspect_ratio = "9:16"
duration = 95.0
"#;

    /// A working directory holding a catalog and an empty store
    pub fn workspace() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.toml"), CATALOG).unwrap();
        dir
    }

    pub fn trimmer(dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("trimmer").unwrap();
        cmd.current_dir(dir)
            .env_remove("RUST_LOG")
            .env_remove("TRIMX_CONFIG")
            .arg("--log-level")
            .arg("warn");
        cmd
    }

    pub fn stored_records(dir: &Path) -> Vec<serde_json::Value> {
        let store = dir.join("trims");
        if !store.exists() {
            return Vec::new();
        }
        std::fs::read_dir(store)
            .unwrap()
            .map(|entry| {
                let content = std::fs::read_to_string(entry.unwrap().path()).unwrap();
                serde_json::from_str(&content).unwrap()
            })
            .collect()
    }
}

use test_utils::*;

#[test]
fn test_overlay_square_frame() {
    let dir = tempfile::tempdir().unwrap();
    trimmer(dir.path())
        .args(["overlay", "--width", "400", "--height", "300", "--aspect", "1:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1:1 (Square)     left=50.0 top=0.0 width=300.0 height=300.0",
        ));
}

#[test]
fn test_overlay_json_lists_all_presets() {
    let dir = tempfile::tempdir().unwrap();
    let output = trimmer(dir.path())
        .args(["overlay", "--width", "1280", "--height", "720", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["aspect"], "16:9");
    assert_eq!(entries[0]["native"], true);
    assert_eq!(entries[0]["overlay"]["width"], 1280.0);
}

#[test]
fn test_overlay_rejects_unknown_aspect() {
    let dir = tempfile::tempdir().unwrap();
    trimmer(dir.path())
        .args(["overlay", "--width", "400", "--height", "300", "--aspect", "4:3"])
        .assert()
        .failure();
}

#[test]
fn test_show_clip() {
    let dir = workspace();
    trimmer(dir.path())
        .args(["show", "--clip", "beach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beach (beach)"))
        .stdout(predicate::str::contains("0:00 - 1:35 of 1:35"))
        .stdout(predicate::str::contains("9:16 (Vertical)"))
        .stdout(predicate::str::contains("Beach.mp4"));
}

#[test]
fn test_show_unknown_clip_fails() {
    let dir = workspace();
    trimmer(dir.path())
        .args(["show", "--clip", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Video not found: nope"));
}

#[test]
fn test_trim_overwrite_writes_record() {
    let dir = workspace();
    trimmer(dir.path())
        .args(["trim", "--clip", "beach", "--start", "0:10", "--end", "25.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Beach (0:10 - 0:25)"));

    let records = stored_records(dir.path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["startTime"], 10.0);
    assert_eq!(records[0]["endTime"], 25.5);
    assert_eq!(records[0]["ownerId"], "owner-7");
    assert_eq!(records[0]["aspectRatio"], "9:16");
    assert!(records[0]["committedAt"].is_string());
}

#[test]
fn test_trim_save_as_new_with_aspect() {
    let dir = workspace();
    trimmer(dir.path())
        .args([
            "trim", "--clip", "beach", "--start", "5", "--end", "9", "--aspect", "1:1", "--name",
            "Beach short", "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resolution\": \"succeeded\""));

    let records = stored_records(dir.path());
    assert_eq!(records[0]["name"], "Beach short");
    assert_eq!(records[0]["aspectRatio"], "1:1");
}

#[test]
fn test_trim_empty_name_is_rejected_locally() {
    let dir = workspace();
    trimmer(dir.path())
        .args(["trim", "--clip", "beach", "--start", "5", "--end", "9", "--name", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid name"));
    assert!(stored_records(dir.path()).is_empty());
}

#[test]
fn test_trim_quota_from_environment() {
    let dir = workspace();
    for _ in 0..2 {
        let _ = trimmer(dir.path())
            .env("TRIMX_STORE_QUOTA", "1")
            .args(["trim", "--clip", "beach", "--start", "1", "--end", "2"])
            .output()
            .unwrap();
    }
    assert_eq!(stored_records(dir.path()).len(), 1);

    trimmer(dir.path())
        .env("TRIMX_STORE_QUOTA", "1")
        .args(["trim", "--clip", "beach", "--start", "1", "--end", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));
}

#[test]
fn test_replay_script() {
    let dir = workspace();
    let script = r#"{"steps": [
        {"step": "finish_load"},
        {"step": "edit_start", "value": "10"},
        {"step": "edit_end", "value": "5"},
        {"step": "playback", "command": {"command": "toggle_play_pause"}},
        {"step": "advance", "seconds": 30},
        {"step": "save", "command": {"save": "open"}},
        {"step": "save", "command": {"save": "save_as_new"}},
        {"step": "save", "command": {"save": "submit_name"}},
        {"step": "save", "command": {"save": "set_name", "name": "Replayed"}},
        {"step": "save", "command": {"save": "submit_name"}}
    ]}"#;
    std::fs::write(dir.path().join("script.json"), script).unwrap();

    let output = trimmer(dir.path())
        .args(["replay", "--clip", "beach", "--script", "script.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 10);
    assert!(steps[7]["errors"][0]
        .as_str()
        .unwrap()
        .contains("Please enter a valid name"));
    assert_eq!(steps[9]["commit"]["resolution"], "succeeded");

    let view = &report["view"];
    assert_eq!(view["range"]["start"], 10.0);
    assert_eq!(view["playing"], false);
    assert_eq!(view["save"]["state"], "idle");

    let records = stored_records(dir.path());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Replayed");
}
