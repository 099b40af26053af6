//! # subproc CLI Config Integration Tests
//!
//! File: cli/tests/config.rs
//!
//! ## Overview
//!
//! Integration tests for `subproc config` and configuration file precedence.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_config_shows_builtin_defaults() {
    let dir = sandbox();
    isolated_cmd(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[run]"))
        .stdout(predicate::str::contains("check_error_code = true"))
        .stdout(predicate::str::contains("follow_output = false"))
        .stdout(predicate::str::contains(r#"log_level = "debug""#));
}

#[test]
fn test_config_project_overrides_user() {
    let dir = sandbox();
    fs::write(
        dir.path().join(USER_CONFIG),
        "[run]\nfollow_output = true\nlog_level = \"info\"\n",
    )
    .unwrap();
    write_project_config(dir.path(), "[run]\nlog_level = \"trace\"\n");

    isolated_cmd(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("follow_output = true"))
        .stdout(predicate::str::contains(r#"log_level = "trace""#));
}

#[test]
fn test_config_found_in_ancestor_directory() {
    let dir = sandbox();
    write_project_config(dir.path(), "[run]\ncheck_error_code = false\n");
    let nested = dir.path().join("deeper/still");
    fs::create_dir_all(&nested).unwrap();

    let mut cmd = subproc_cmd();
    cmd.current_dir(&nested)
        .env("SUBPROC_CONFIG", dir.path().join(USER_CONFIG))
        .env_remove("RUST_LOG")
        .args(["config", "--no-defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("check_error_code = false"))
        .stdout(predicate::str::contains("log_level").not());
}

#[test]
fn test_config_env_var_must_name_a_file() {
    let dir = sandbox();
    isolated_cmd(dir.path())
        .env("SUBPROC_CONFIG", dir.path().join("missing.toml"))
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("which is not a file"));
}

#[test]
fn test_config_rejects_file_as_working_directory() {
    let dir = sandbox();
    let file = dir.path().join("plain-file");
    fs::write(&file, "").unwrap();
    write_project_config(
        dir.path(),
        &format!("[run]\nworking_directory = {:?}\n", file.to_string_lossy()),
    );

    isolated_cmd(dir.path())
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}
