//! CLI integration tests for edesto.
//!
//! These tests run the real binary against temporary project directories.
//! None of them need a board attached.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the edesto binary command.
fn edesto() -> Command {
    Command::cargo_bin("edesto").unwrap()
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

// ============================================================================
// edesto boards
// ============================================================================

#[test]
fn test_boards_lists_catalog() {
    edesto()
        .arg("boards")
        .assert()
        .success()
        .stdout(predicate::str::contains("Supported boards (12)"))
        .stdout(predicate::str::contains("esp32"))
        .stdout(predicate::str::contains("stm32-nucleo"));
}

#[test]
fn test_boards_unknown_toolchain() {
    edesto()
        .args(["boards", "--toolchain", "bazel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown toolchain `bazel`"))
        .stderr(predicate::str::contains("platformio"));
}

// ============================================================================
// edesto init
// ============================================================================

#[test]
fn test_init_with_board_and_port() {
    let tmp = temp_dir();
    write(tmp.path(), "blink.ino", "void setup() {}\nvoid loop() {}\n");

    edesto()
        .arg("init")
        .arg(tmp.path())
        .args(["--board", "arduino-uno", "--port", "/dev/ttyACM0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated SKILLS.md for Arduino Uno on /dev/ttyACM0"));

    let skills = fs::read_to_string(tmp.path().join("SKILLS.md")).unwrap();
    assert!(skills.starts_with("# Embedded Development: Arduino Uno"));
    assert!(skills.contains("arduino-cli upload --fqbn arduino:avr:uno --port /dev/ttyACM0 ."));
    assert!(skills.contains("## Troubleshooting"));

    for copy in ["CLAUDE.md", ".cursorrules", "AGENTS.md"] {
        assert_eq!(fs::read_to_string(tmp.path().join(copy)).unwrap(), skills);
    }
}

#[test]
fn test_init_refuses_to_overwrite() {
    let tmp = temp_dir();
    write(tmp.path(), "SKILLS.md", "hand written\n");

    edesto()
        .arg("init")
        .arg(tmp.path())
        .args(["--board", "esp32", "--port", "/dev/ttyUSB0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("SKILLS.md")).unwrap(),
        "hand written\n"
    );

    edesto()
        .arg("init")
        .arg(tmp.path())
        .args(["--board", "esp32", "--port", "/dev/ttyUSB0", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(tmp.path().join("SKILLS.md"))
        .unwrap()
        .contains("ESP32"));
}

#[test]
fn test_init_port_without_board() {
    let tmp = temp_dir();

    edesto()
        .arg("init")
        .arg(tmp.path())
        .args(["--port", "/dev/ttyUSB0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a board is required"));
    assert!(!tmp.path().join("SKILLS.md").exists());
}

#[test]
fn test_init_unknown_board() {
    let tmp = temp_dir();

    edesto()
        .arg("init")
        .arg(tmp.path())
        .args(["--board", "esp64", "--port", "/dev/ttyUSB0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown board `esp64`"))
        .stderr(predicate::str::contains("edesto boards"));
}

#[test]
fn test_init_override_file() {
    let tmp = temp_dir();
    write(
        tmp.path(),
        "edesto.toml",
        "[toolchain]\nname = \"nrf-make\"\ncompile = \"make build\"\nupload = \"make flash PORT={port}\"\n\n[serial]\nport = \"/dev/ttyUSB0\"\n",
    );

    edesto().arg("init").arg(tmp.path()).assert().success();

    let skills = fs::read_to_string(tmp.path().join("SKILLS.md")).unwrap();
    assert!(skills.contains("make flash PORT=/dev/ttyUSB0"));
    assert!(skills.contains("- Framework: nrf-make"));
    assert!(!skills.contains("{port}"));
}

#[test]
fn test_init_jtag_requires_board() {
    let tmp = temp_dir();

    edesto()
        .arg("init")
        .arg(tmp.path())
        .args(["--upload", "jtag", "--probe", "stlink"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a board is required"));
}

#[test]
fn test_init_rejects_unknown_upload_method() {
    edesto()
        .args(["init", "--upload", "usb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ============================================================================
// edesto config
// ============================================================================

#[test]
fn test_config_set_get_list() {
    let tmp = temp_dir();
    let path = tmp.path().to_str().unwrap();

    edesto()
        .args(["config", "set", "serial.port", "/dev/ttyUSB1", "--path", path])
        .assert()
        .success();
    edesto()
        .args(["config", "set", "serial.baud_rate", "9600", "--path", path])
        .assert()
        .success();

    let contents = fs::read_to_string(tmp.path().join("edesto.toml")).unwrap();
    assert!(contents.contains("baud_rate = 9600"));

    edesto()
        .args(["config", "get", "serial.port", "--path", path])
        .assert()
        .success()
        .stdout("/dev/ttyUSB1\n");

    edesto()
        .args(["config", "list", "--path", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("serial.port = /dev/ttyUSB1"))
        .stdout(predicate::str::contains("serial.baud_rate = 9600"));
}

#[test]
fn test_config_get_missing_key() {
    let tmp = temp_dir();

    edesto()
        .args(["config", "get", "jtag.target", "--path"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not set"));
}

#[test]
fn test_config_set_requires_dotted_key() {
    let tmp = temp_dir();

    edesto()
        .args(["config", "set", "port", "/dev/ttyUSB0", "--path"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("dotted"));
}

// ============================================================================
// edesto doctor / completions
// ============================================================================

#[test]
fn test_doctor_prints_report() {
    edesto()
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("edesto doctor"))
        .stdout(predicate::str::contains("arduino"))
        .stdout(predicate::str::contains("Summary:"));
}

#[test]
fn test_completions_bash() {
    edesto()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edesto"));
}

#[test]
fn test_help() {
    edesto()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("doctor"));
}
