//! Integration tests for the `stencil` binary
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const SETTINGS: &str = "\
build_configurations:
  - name: debug
    directory: .
active_configuration: debug
variables:
  project.name: stencil
";

/// `stencil --settings <dir>/.stencil.yaml` with no log filter and a closed stdin.
fn stencil(settings_dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("stencil")?;
    cmd.arg("--settings")
        .arg(settings_dir.join(".stencil.yaml"))
        .env_remove("STENCIL_LOG")
        .write_stdin("");
    Ok(cmd)
}

fn project() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join(".stencil.yaml"), SETTINGS).unwrap();
    std::fs::write(dir.path().join("Makefile"), "all:\ninstall: all\n").unwrap();
    dir
}

#[test]
fn test_resolve_prints_one_line_per_argument() -> TestResult {
    let dir = project();
    let root_name = dir.path().file_name().unwrap().to_str().unwrap();

    stencil(dir.path())?
        .args(["resolve", "${project.name}@${workspace.rootName}", "plain", "${unknown}"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "stencil@{root_name}\nplain\n${{unknown}}\n"
        )));
    Ok(())
}

#[test]
fn test_resolve_with_pinned_target() -> TestResult {
    let dir = project();

    stencil(dir.path())?
        .args(["resolve", "--target", "install", "make ${build.target}"])
        .assert()
        .success()
        .stdout(predicate::str::diff("make install\n"));
    Ok(())
}

#[test]
fn test_closed_stdin_cancels_target_prompt() -> TestResult {
    let dir = project();

    stencil(dir.path())?
        .args(["resolve", "--explain", "make ${build.target}"])
        .assert()
        .success()
        .stdout(predicate::str::diff("make ${build.target}\n"))
        .stderr(predicate::str::contains("Enter the target to build..."))
        .stderr(predicate::str::contains("unresolved ${build.target}"));
    Ok(())
}

#[test]
fn test_strict_fails_on_unresolved() -> TestResult {
    let dir = project();

    stencil(dir.path())?
        .args(["resolve", "--strict", "${unknown}"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown"));
    Ok(())
}

#[test]
fn test_list_shows_builtin_variables() -> TestResult {
    let dir = project();

    stencil(dir.path())?
        .args(["list", "--no-build-context"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"(?m)^build\.target\s.*\[requires buildTask\] \(unavailable\)$",
        )?)
        .stdout(predicate::str::is_match(r"(?m)^project\.name$")?)
        .stdout(predicate::str::is_match(r"(?m)^workspace\.root\s")?)
        .stdout(predicate::str::is_match(r"(?m)^workspace\.rootName\s")?);
    Ok(())
}

#[test]
fn test_unknown_configuration_fails() -> TestResult {
    let dir = project();

    stencil(dir.path())?
        .args(["resolve", "--configuration", "release", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration 'release'"));
    Ok(())
}
