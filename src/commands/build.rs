use crate::build::{BuildConfig, Executor};
use crate::cli::parser::CliParser;
use crate::compiler::CompilerBackend;
use crate::result::{GoBuilderError, Result};
use crate::utils::{ProcessManager, ProcessRunner};
use std::fmt;
use std::path::Path;

pub async fn execute(config_path: &Path, target: &str) -> Result<()> {
    let mut cmd = BuildCommand::new();
    cmd.execute(config_path, target).await
}

/** Progress of one build run
 *
 * # Sequence
 * `Idle → ConfigLoaded → DependenciesChecked → PreBuildDone → BuildDone →
 * PostBuildDone → Complete`. Any failure moves straight to `Failed`.
 *
 * # Notes
 * - `DependenciesChecked` is an extra step between loading and pre-build:
 *   every tool named in `dependencies.check` must be on PATH, otherwise the
 *   run stops with `MissingDependency`. An empty list passes trivially.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ConfigLoaded,
    DependenciesChecked,
    PreBuildDone,
    BuildDone,
    PostBuildDone,
    Complete,
    Failed(String),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::ConfigLoaded => write!(f, "config loaded"),
            Stage::DependenciesChecked => write!(f, "dependencies checked"),
            Stage::PreBuildDone => write!(f, "pre-build done"),
            Stage::BuildDone => write!(f, "build done"),
            Stage::PostBuildDone => write!(f, "post-build done"),
            Stage::Complete => write!(f, "complete"),
            Stage::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

pub struct BuildCommand {
    stage: Stage,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self { stage: Stage::Idle }
    }
}

impl BuildCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Loads the config, checks required tools, then runs the build pipeline.
    pub async fn execute(&mut self, config_path: &Path, target: &str) -> Result<()> {
        log::info!(
            "Starting build of target {} with config {}",
            target,
            config_path.display()
        );

        let loaded = match CliParser::validate_config_path(config_path) {
            Ok(path) => BuildConfig::load(path).await,
            Err(e) => Err(e),
        };
        let config = loaded.map_err(|e| self.fail(e))?;
        self.advance(Stage::ConfigLoaded);

        ProcessManager::new()
            .check_dependencies(&config.dependencies.check)
            .map_err(|e| self.fail(e))?;
        self.advance(Stage::DependenciesChecked);

        let executor = Executor::new(config);
        self.run(&executor, target).await
    }

    /// Runs pre-build tasks, the build and post-build tasks in that order.
    pub async fn run<R: ProcessRunner, C: CompilerBackend>(
        &mut self,
        executor: &Executor<R, C>,
        target: &str,
    ) -> Result<()> {
        executor
            .run_pre_build_tasks()
            .await
            .map_err(|e| self.fail(e))?;
        self.advance(Stage::PreBuildDone);

        executor
            .build_target(target)
            .await
            .map_err(|e| self.fail(e))?;
        self.advance(Stage::BuildDone);

        executor
            .run_post_build_tasks()
            .await
            .map_err(|e| self.fail(e))?;
        self.advance(Stage::PostBuildDone);

        self.advance(Stage::Complete);
        Ok(())
    }

    fn advance(&mut self, next: Stage) {
        log::debug!("Build stage: {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn fail(&mut self, err: GoBuilderError) -> GoBuilderError {
        log::error!("Build stopped after stage '{}': {}", self.stage, err);
        self.stage = Stage::Failed(err.to_string());
        err
    }
}
