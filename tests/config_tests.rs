//! Integration tests for `weekly-review config`

mod support;

use predicates::prelude::*;
use std::fs;
use support::TestEnv;

#[test]
fn test_config_path_honours_override() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            env.config_path().display().to_string(),
        ));
}

#[test]
fn test_config_show_defaults_without_file() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model = \"llama3.1\""))
        .stdout(predicate::str::contains("output_folder = \"Weekly Reviews\""));

    assert!(!env.config_path().exists());
}

#[test]
fn test_config_show_json() {
    let env = TestEnv::new();
    env.write_config("[llm]\nmodel = \"mistral\"\n");

    let output = env
        .cmd()
        .args(["--format", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["llm"]["model"], "mistral");
    assert_eq!(json["llm"]["endpoint_path"], "/api/chat");
    assert_eq!(json["review"]["default_preset"], "current_week");
    assert_eq!(json["review"]["max_filename_attempts"], 1000);
}

#[test]
fn test_config_show_masks_api_key() {
    let env = TestEnv::new();
    env.write_config(
        "[llm]\napi_key_header_name = \"Authorization\"\napi_key_header_value = \"Bearer secret\"\n",
    );

    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_key_header_value = \"***\""))
        .stdout(predicate::str::contains("Authorization"))
        .stdout(predicate::str::contains("secret").not());

    let output = env
        .cmd()
        .args(["--format", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["llm"]["api_key_header_value"], "***");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("secret"));

    // The file on disk keeps the real value
    let saved = fs::read_to_string(env.config_path()).unwrap();
    assert!(saved.contains("Bearer secret"));
}

#[test]
fn test_config_init_writes_defaults_once() {
    let env = TestEnv::new();
    env.cmd().args(["config", "init"]).assert().success();

    let written = fs::read_to_string(env.config_path()).unwrap();
    assert!(written.contains("[llm]"));
    assert!(written.contains("[review]"));
    assert!(written.contains("timezone = \"UTC\""));

    env.cmd()
        .args(["config", "init"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    env.cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_clamps_limits() {
    let env = TestEnv::new();
    env.write_config("[review]\nmax_notes = 99999\n");
    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_notes = 500"));
}

#[test]
fn test_config_show_rejects_malformed_file() {
    let env = TestEnv::new();
    env.write_config("[llm\nmodel =");
    env.cmd()
        .args(["--format", "json", "config", "show"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid_config"));
}
