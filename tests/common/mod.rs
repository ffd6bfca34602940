//! Shared helpers for executor integration tests.

use gobuilder::build::{BuildConfig, ConfigFormat};
use gobuilder::result::{GoBuilderError, Result};
use gobuilder::utils::{CommandSpec, ExitOutcome, ProcessRunner};
use std::path::Path;
use std::sync::Mutex;

/// Records every invocation instead of spawning it.
///
/// Compiler invocations succeed and, with `write_outputs`, leave a fake
/// binary at the `-o` path. The call at index `fail_at` exits with code 1.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    fail_at: Option<usize>,
    spawn_error_at: Option<usize>,
    write_outputs: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writing_outputs() -> Self {
        Self {
            write_outputs: true,
            ..Self::default()
        }
    }

    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub fn spawn_failing_at(index: usize) -> Self {
        Self {
            spawn_error_at: Some(index),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn outputs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.arg_value("-o").map(str::to_string))
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ExitOutcome> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(spec.clone());
            calls.len() - 1
        };

        if self.spawn_error_at == Some(index) {
            return Err(GoBuilderError::process(format!(
                "Failed to start {}: not found",
                spec.program
            )));
        }
        if self.fail_at == Some(index) {
            return Ok(ExitOutcome { code: Some(1) });
        }
        if self.write_outputs {
            if let Some(output) = spec.arg_value("-o") {
                std::fs::write(output, b"fake binary").unwrap();
            }
        }

        Ok(ExitOutcome { code: Some(0) })
    }
}

/// A two-platform config whose outputs live under `root`.
pub fn sample_config(root: &Path, zip: bool) -> BuildConfig {
    let yaml = format!(
        r#"
project: demo
version: "1.2"
zip: {zip}
build:
  default:
    os: linux
    arch: amd64
    output: {root}/bin/{{{{.Project}}}}
    ldflags: -X main.version={{{{.Version}}}}
  targets:
    linux-amd64:
      os: linux
      arch: amd64
      output: {root}/dist/linux/{{{{.Project}}}}-{{{{.Version}}}}
      tags: [netgo]
    darwin-arm64:
      os: darwin
      arch: arm64
      output: {root}/dist/darwin/{{{{.Project}}}}-{{{{.Version}}}}
      cgo: true
    all:
      platforms: [linux-amd64, darwin-arm64]
"#,
        zip = zip,
        root = root.display()
    );

    let mut config = BuildConfig::parse(&yaml, ConfigFormat::Yaml).unwrap();
    config.process_templates().unwrap();
    config.validate().unwrap();
    config
}
