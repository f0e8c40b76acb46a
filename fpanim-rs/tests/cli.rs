//! CLI integration tests
//!
//! Each test writes an animation document into a temporary directory and
//! runs the real binary against it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const RELOAD: &str = r#"{
    "hold": false,
    "itemAnimationStart": 0,
    "itemAnimationEnd": 800,
    "playerKeyFrames": [
        { "easingTime": 0, "easingFunction": "Linear", "elements": {} },
        {
            "easingTime": 400,
            "easingFunction": "EaseInOutCubic",
            "switchArms": true,
            "elements": { "UpperTorso": [0, 0, 0, 0, 0, 8] }
        },
        { "easingTime": 800, "easingFunction": "Linear", "elements": { "UpperTorso": [0, 0, 0, 0, 0, 0] } }
    ],
    "itemKeyFrames": [
        { "durationFraction": 0.5, "easingFunction": "Linear", "elements": { "Magazine": [0, -1, 0, 0, 0, 0] } },
        { "durationFraction": 1.0, "easingFunction": "Linear", "elements": { "Magazine": [0, 0, 0, 0, 0, 0] } }
    ],
    "soundFrames": [
        { "code": "mag-out", "durationFraction": 0.25 },
        { "code": "mag-in", "durationFraction": 0.75, "volume": 0.5 }
    ]
}"#;

fn fpanim() -> Command {
    Command::cargo_bin("fpanim-rs").unwrap()
}

fn write_document(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_info() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "reload.json", RELOAD);

    fpanim()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration: 800 ms"))
        .stdout(predicate::str::contains("Player Keyframes: 3"))
        .stdout(predicate::str::contains("Sounds: 2"));
}

#[test]
fn test_info_detailed_lists_sounds() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "reload.json", RELOAD);

    fpanim()
        .args(["info", "--detailed"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("EaseInOutCubic"))
        .stdout(predicate::str::contains("mag-in"))
        .stdout(predicate::str::contains("600 ms"));
}

#[test]
fn test_validate_clean_document() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "reload.json", RELOAD);

    fpanim()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let contents = RELOAD.replace("\"durationFraction\": 0.25", "\"durationFraction\": 0.0");
    let path = write_document(&dir, "reload.json", &contents);

    fpanim()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("'mag-out'"));

    fpanim()
        .args(["validate", "--strict"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn test_validate_unknown_easing_fails() {
    let dir = TempDir::new().unwrap();
    let contents = RELOAD.replace("EaseInOutCubic", "Elastic");
    let path = write_document(&dir, "reload.json", &contents);

    fpanim()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown easing function: 'Elastic'"));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    fpanim()
        .arg("info")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load animation"));
}

#[test]
fn test_sample_json() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "reload.json", RELOAD);

    let output = fpanim()
        .args(["sample", "--json", "--at", "200,1000"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let samples: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(samples[0]["timeMs"], 200);
    assert_eq!(samples[0]["finished"], false);
    assert_eq!(samples[0]["player"]["elements"]["UpperTorso"][5], 4.0);
    assert_eq!(samples[1]["finished"], true);
    assert_eq!(samples[1]["player"]["switchArms"], false);
    assert_eq!(samples[1]["item"]["Magazine"][1], 0.0);
}

#[test]
fn test_sample_table() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "reload.json", RELOAD);

    fpanim()
        .args(["sample", "--at", "400"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pose at 400 ms"))
        .stdout(predicate::str::contains("UpperTorso"))
        .stdout(predicate::str::contains("Magazine"));
}

#[test]
fn test_sounds() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "reload.json", RELOAD);

    fpanim()
        .args(["sounds", "--step", "100"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 sound(s) fired"))
        .stdout(predicate::str::contains("mag-out"))
        .stdout(predicate::str::contains("mag-in"));
}

#[test]
fn test_unreachable_sound_never_fires() {
    let dir = TempDir::new().unwrap();
    let contents = RELOAD.replace("\"durationFraction\": 0.75", "\"durationFraction\": 1e30");
    let path = write_document(&dir, "reload.json", &contents);

    fpanim()
        .args(["sounds", "--step", "16"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sound(s) fired"))
        .stdout(predicate::str::contains("mag-out"));

    fpanim()
        .args(["info", "--detailed"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("never"));
}

#[test]
fn test_format_round_trips() {
    let dir = TempDir::new().unwrap();
    let contents = RELOAD
        .replace("\"itemAnimationEnd\": 800", "\"ItemAnimationEnd\": 5000")
        .replace("\"hold\": false", "\"Hold\": true");
    let input = write_document(&dir, "reload.json", &contents);
    let output = dir.path().join("formatted.json");

    fpanim()
        .arg("format")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let formatted: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(formatted["hold"], true);
    assert_eq!(formatted["itemAnimationEnd"], 800);
    assert_eq!(formatted["soundFrames"][1]["range"], 32.0);

    fpanim()
        .arg("validate")
        .arg(&output)
        .assert()
        .success();
}

#[test]
fn test_format_to_stdout() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "reload.json", RELOAD);

    fpanim()
        .arg("format")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"playerKeyFrames\""))
        .stdout(predicate::str::contains("\"randomizePitch\": true"));
}

#[test]
fn test_completions() {
    fpanim()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fpanim-rs"));
}
