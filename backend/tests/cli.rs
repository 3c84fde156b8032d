//! Exit status and output of the `songsplit` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const URL: &str = "https://demo.supabase.co";
const KEY: &str = "public-anon-key-for-cli";

/// Run the binary in `dir` with only the given backend variables set.
fn songsplit(dir: &Path, vars: &[(&str, &str)], args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_songsplit"));
    cmd.current_dir(dir)
        .env_remove("BACKEND_URL")
        .env_remove("BACKEND_API_KEY")
        .env_remove("DEBUG")
        .env_remove("RUST_LOG")
        .args(args);
    for (name, value) in vars {
        cmd.env(name, value);
    }
    cmd.output().expect("failed to run songsplit")
}

#[test]
fn check_succeeds_with_valid_environment() {
    let dir = tempdir().unwrap();
    let out = songsplit(
        dir.path(),
        &[("BACKEND_URL", URL), ("BACKEND_API_KEY", KEY)],
        &["check"],
    );

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Settings valid"));
    assert!(!stderr.contains(KEY));
}

#[test]
fn check_exits_1_without_endpoint() {
    let dir = tempdir().unwrap();
    let out = songsplit(dir.path(), &[("BACKEND_API_KEY", KEY)], &["check"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("endpointUrl"));
}

#[test]
fn check_exits_1_on_bad_overrides() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("songsplit.json");
    fs::write(&config, r#"{ "contributorRoles": ["Artist", "Artist"] }"#).unwrap();

    let out = songsplit(
        dir.path(),
        &[("BACKEND_URL", URL), ("BACKEND_API_KEY", KEY)],
        &["--config", config.to_str().unwrap(), "check"],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("contributorRoles"));
}

#[test]
fn unrecognized_debug_value_is_warned_about() {
    let dir = tempdir().unwrap();
    let out = songsplit(
        dir.path(),
        &[("BACKEND_URL", URL), ("BACKEND_API_KEY", KEY), ("DEBUG", "verbose")],
        &["check"],
    );

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unrecognized boolean"));
}

#[test]
fn show_masks_the_api_key() {
    let dir = tempdir().unwrap();
    let out = songsplit(
        dir.path(),
        &[("BACKEND_URL", URL), ("BACKEND_API_KEY", KEY)],
        &["show"],
    );

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["backend"]["endpointUrl"], URL);
    assert!(!stdout.contains(KEY));
}

#[test]
fn defaults_needs_no_backend_values() {
    let dir = tempdir().unwrap();
    let out = songsplit(dir.path(), &[], &["defaults"]);

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["defaultCreatorOwnershipPercent"], 50);
}
