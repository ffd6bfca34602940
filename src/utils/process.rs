use crate::result::{GoBuilderError, Result};
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use which::which;

/// A subprocess invocation: program, arguments and environment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// `sh -c <command>`
    pub fn shell(command: &str) -> Self {
        Self::new("sh").arg("-c").arg(command)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value following `flag` in the argument list, e.g. the path after `-o`.
    pub fn arg_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{}={} ", key, value)?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "termination by signal".to_string(),
        }
    }
}

/// Runs subprocesses to completion. Implemented by [`ProcessManager`] for real
/// execution and by recording fakes in tests.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ExitOutcome>;
}

#[derive(Default)]
pub struct ProcessManager;

impl ProcessManager {
    pub fn new() -> Self {
        Self
    }

    pub fn find_executable(&self, name: &str) -> Result<String> {
        match which(name) {
            Ok(path) => Ok(path.to_string_lossy().to_string()),
            Err(_) => Err(GoBuilderError::missing_dependency(format!(
                "executable not found on PATH: {}",
                name
            ))),
        }
    }

    pub fn check_dependencies(&self, names: &[String]) -> Result<()> {
        for name in names {
            let path = self.find_executable(name)?;
            log::debug!("Dependency {} found at {}", name, path);
        }
        Ok(())
    }
}

impl ProcessRunner for ProcessManager {
    async fn run(&self, spec: &CommandSpec) -> Result<ExitOutcome> {
        log::debug!("Spawning: {}", spec);

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        command.envs(spec.env.iter().map(|(k, v)| (k, v)));
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());
        command.stdin(Stdio::inherit());

        let mut child = command.spawn().map_err(|e| {
            GoBuilderError::process(format!("Failed to start {}: {}", spec.program, e))
        })?;

        let status = child.wait().await.map_err(|e| {
            GoBuilderError::process(format!("Failed to wait for {}: {}", spec.program, e))
        })?;

        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}
