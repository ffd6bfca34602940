use crate::build::archive;
use crate::build::{BuildConfig, ALL_TARGETS, POST_BUILD_TASK, PRE_BUILD_TASK};
use crate::compiler::{CompilerBackend, GoToolchain};
use crate::result::{GoBuilderError, Result};
use crate::utils::{CommandSpec, ProcessManager, ProcessRunner};
use std::time::{Duration, Instant};

/** Builds targets and runs task lists for one loaded configuration
 *
 * # Type Parameters
 * - `R`: how subprocesses are run, [`ProcessManager`] outside of tests
 * - `C`: which compiler turns a target into a command, [`GoToolchain`] by default
 *
 * # Notes
 * - The configuration is read-only once the executor owns it
 * - Everything runs sequentially and stops at the first failure
 */
pub struct Executor<R = ProcessManager, C = GoToolchain> {
    config: BuildConfig,
    runner: R,
    compiler: C,
}

impl Executor {
    pub fn new(config: BuildConfig) -> Self {
        Self::with_backends(config, ProcessManager::new(), GoToolchain::new())
    }
}

impl<R: ProcessRunner, C: CompilerBackend> Executor<R, C> {
    pub fn with_backends(config: BuildConfig, runner: R, compiler: C) -> Self {
        Self {
            config,
            runner,
            compiler,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /** Builds `target_name`, or every platform of the `all` entry in order
     *
     * # Errors
     * - `UnknownTarget` when the name (or `all`) is not configured
     * - the first error of any platform; later platforms are not attempted
     */
    pub async fn build_target(&self, target_name: &str) -> Result<()> {
        if target_name != ALL_TARGETS {
            return self.build_single_target(target_name).await;
        }

        let platforms = &self.config.target(ALL_TARGETS)?.platforms;
        if platforms.is_empty() {
            log::warn!("Target 'all' lists no platforms, nothing to build");
            return Ok(());
        }

        for (index, platform) in platforms.iter().enumerate() {
            log::info!(
                "Building platform {} of {}: {}",
                index + 1,
                platforms.len(),
                platform
            );
            self.build_single_target(platform).await?;
        }

        Ok(())
    }

    /** Builds one target and packs it when `zip` is set
     *
     * # Process Flow
     * 1. Resolve the target (`default` maps to `build.default`) and check its fields
     * 2. Create the output directory and its parents
     * 3. Run the compiler with stdout/stderr passed through
     * 4. Replace the artifact with `<output>.zip` when archiving is enabled
     *
     * # Errors
     * `UnknownTarget`, `InvalidConfig`, `OutputDir`, `BuildFailed` or `Archive`.
     * Nothing touches the filesystem before the target resolves.
     */
    pub async fn build_single_target(&self, target_name: &str) -> Result<()> {
        let target = self.config.target(target_name)?;
        target.validate(target_name)?;

        let output = target.output_path();
        if let Some(output_dir) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
                GoBuilderError::output_dir(format!("{}: {}", output_dir.display(), e))
            })?;
        }

        let command = self.compiler.command(target);
        println!(
            "Building for {}/{} to {}...",
            target.os, target.arch, target.output
        );
        log::info!("Building target {}: {}", target_name, command);

        let started = Instant::now();
        let outcome = self.runner.run(&command).await.map_err(|e| {
            GoBuilderError::build_failed(format!("target {}: {}", target_name, e))
        })?;

        if !outcome.success() {
            log::error!(
                "{} failed for target {} with {}",
                self.compiler.name(),
                target_name,
                outcome.describe()
            );
            return Err(GoBuilderError::build_failed(format!(
                "target {}: {} exited with {}",
                target_name,
                self.compiler.name(),
                outcome.describe()
            )));
        }

        if self.config.zip {
            let zip_path = archive::package_artifact(output, &self.config.project).await?;
            println!("Output zipped to: {}", zip_path.display());
        }

        let time_str = format_duration(started.elapsed());
        println!("Build successful: {} ({})", target.output, time_str);
        log::info!(
            "Build completed successfully: {} in {}",
            target.output,
            time_str
        );

        Ok(())
    }

    /** Runs every command of the task list `task_name` through `sh -c`
     *
     * # Errors
     * - `UnknownTask` when no list has that name; an empty list succeeds
     * - `TaskFailed` on the first non-zero exit, later commands do not run
     */
    pub async fn run_tasks(&self, task_name: &str) -> Result<()> {
        let commands = self
            .config
            .task(task_name)
            .ok_or_else(|| GoBuilderError::unknown_task(task_name.to_string()))?;

        for command in commands {
            println!("Running task: {}", command);
            log::info!("Running {} task: {}", task_name, command);

            let outcome = self
                .runner
                .run(&CommandSpec::shell(command))
                .await
                .map_err(|e| {
                    GoBuilderError::task_failed(format!("{} '{}': {}", task_name, command, e))
                })?;

            if !outcome.success() {
                return Err(GoBuilderError::task_failed(format!(
                    "{} '{}' exited with {}",
                    task_name,
                    command,
                    outcome.describe()
                )));
            }
        }

        Ok(())
    }

    pub async fn run_pre_build_tasks(&self) -> Result<()> {
        self.run_optional_tasks(PRE_BUILD_TASK).await
    }

    pub async fn run_post_build_tasks(&self) -> Result<()> {
        self.run_optional_tasks(POST_BUILD_TASK).await
    }

    async fn run_optional_tasks(&self, task_name: &str) -> Result<()> {
        if self.config.task(task_name).is_none() {
            log::debug!("No {} tasks configured", task_name);
            return Ok(());
        }
        self.run_tasks(task_name).await
    }
}

/// Elapsed build time: `850ms`, `12.40s`, or `3m05s` for builds over a minute.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    match total_ms {
        0..=999 => format!("{}ms", total_ms),
        1_000..=59_999 => format!("{:.2}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs();
            format!("{}m{:02}s", secs / 60, secs % 60)
        }
    }
}
