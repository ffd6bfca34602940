//! CLI smoke tests for gobuilder.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The gobuilder binary, logging into the temp dir instead of the user's config dir.
fn gobuilder(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("gobuilder");
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env("HOME", temp.path());
    cmd
}

fn temp_config(content: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("build-config.yaml"), content).unwrap();
    temp
}

const TASK_CONFIG: &str = r#"
project: demo
version: "0.3"
tasks:
  hello:
    - echo hello-{{.Project}}-{{.Version}}
  broken:
    - exit 4
    - echo unreachable
"#;

#[test]
fn help_lists_flags() {
    let temp = TempDir::new().unwrap();
    gobuilder(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--target"));
}

#[test]
fn missing_config_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    gobuilder(&temp)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("gobuilder init"));
}

#[test]
fn init_writes_config_once() {
    let temp = TempDir::new().unwrap();
    gobuilder(&temp).arg("init").assert().success();
    assert!(temp.path().join("build-config.yaml").is_file());

    gobuilder(&temp)
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    gobuilder(&temp).args(["init", "--force"]).assert().success();
}

#[test]
fn task_runs_templated_commands() {
    let temp = temp_config(TASK_CONFIG);
    gobuilder(&temp)
        .args(["task", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Running task: echo hello-demo-0.3"))
        .stdout(predicate::str::contains("hello-demo-0.3\n"));
}

#[test]
fn failing_task_exits_non_zero() {
    let temp = temp_config(TASK_CONFIG);
    gobuilder(&temp)
        .args(["task", "broken"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unreachable").not())
        .stderr(predicate::str::contains("Task failed"));
}

#[test]
fn unknown_target_exits_non_zero() {
    let temp = temp_config(TASK_CONFIG);
    gobuilder(&temp)
        .args(["--target", "nonexistent"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown build target: nonexistent"));
}

#[test]
fn pre_build_failure_stops_the_run() {
    let temp = temp_config(
        "project: demo\nbuild:\n  targets:\n    web:\n      os: js\n      arch: wasm\n      output: out/web\ntasks:\n  pre-build:\n    - exit 2\n",
    );
    gobuilder(&temp)
        .args(["--target", "web"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Building for").not())
        .stderr(predicate::str::contains("pre-build"));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn targets_lists_configuration() {
    let temp = TempDir::new().unwrap();
    gobuilder(&temp).arg("init").assert().success();
    gobuilder(&temp)
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("linux-amd64, darwin-arm64"))
        .stdout(predicate::str::contains("bin/app"));
}
