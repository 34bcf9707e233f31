//! Binary-level action tests.
//!
//! These run with an empty PATH so no real git/deno/docker is ever invoked;
//! the first external command fails with "not found" and the action aborts
//! with a non-zero exit, which is exactly the fail-fast contract.

use std::io::Write;
use std::process::Command;

fn stevedore() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stevedore"));
    cmd.env("PATH", "");
    cmd
}

#[test]
fn test_no_action_defaults_to_redeploy() {
    let output = stevedore().output().unwrap();

    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("defaulting to redeploy"),
        "expected default-action notice; got:\n{}",
        stdout
    );
    assert!(stdout.contains("stevedore redeploy"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("command not found: 'docker'"),
        "redeploy should start with the docker dependency check; got:\n{}",
        stderr
    );
}

#[test]
fn test_default_and_explicit_redeploy_fail_the_same_way() {
    let implicit = stevedore().output().unwrap();
    let explicit = stevedore().arg("redeploy").output().unwrap();

    assert!(!implicit.status.success());
    assert!(!explicit.status.success());

    // both reach the same first step and die on the same diagnostic
    let implicit_err = String::from_utf8_lossy(&implicit.stderr);
    let explicit_err = String::from_utf8_lossy(&explicit.stderr);
    assert_eq!(implicit_err, explicit_err);
}

#[test]
fn test_stop_requires_container_engine() {
    let output = stevedore().arg("stop").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("command not found: 'docker'"));
}

#[test]
fn test_explicit_config_path_must_exist() {
    let output = stevedore()
        .args(["--config", "/nonexistent/stevedore.toml", "stop"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_env_overrides_win_over_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "image_name = \"from-file\"\ncontainer_name = \"from-file\""
    )
    .unwrap();

    let output = stevedore()
        .env("STEVEDORE_IMAGE", "from-env")
        .env("STEVEDORE_CONTAINER", "tickets-override")
        .arg("--config")
        .arg(file.path())
        .arg("start")
        .output()
        .unwrap();

    // docker is unavailable, but the attempted run command is echoed first
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("--name tickets-override"),
        "container override should reach the run command; got:\n{}",
        stdout
    );
    assert!(
        stdout.contains(" from-env"),
        "image override should reach the run command; got:\n{}",
        stdout
    );
    assert!(!stdout.contains("from-file"));
}

#[test]
fn test_env_override_redirects_repo_path() {
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("checkout");

    let output = stevedore()
        .env("STEVEDORE_REPO_PATH", &repo)
        .arg("build")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(&format!("Working copy {} missing", repo.display())),
        "build should target the overridden working copy; got:\n{}",
        stdout
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("command not found: 'git'"));
}

#[test]
fn test_malformed_config_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ports = \"not-a-list\"").unwrap();

    let output = stevedore()
        .arg("--config")
        .arg(file.path())
        .arg("stop")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid configuration"),
        "expected config parse diagnostic; got:\n{}",
        stderr
    );
}
