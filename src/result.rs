use std::borrow::Cow;
use thiserror::Error;

/** Main Result type alias for gobuilder operations
 *
 * # Usage
 * ```no_run
 * use gobuilder::result::Result;
 *
 * fn read_config() -> Result<String> {
 *     // Function automatically propagates GoBuilderError
 *     let content = std::fs::read_to_string("build-config.yaml")?;
 *     Ok(content)
 * }
 * ```
 */
pub type Result<T> = std::result::Result<T, GoBuilderError>;

/** Error enumeration covering every stage of a build run
 *
 * # Error Categories
 * - **ConfigRead / ConfigParse**: loading the configuration file
 * - **Template**: placeholder resolution inside config fields
 * - **InvalidConfig**: structurally valid but unusable configuration
 * - **UnknownTarget / UnknownTask**: lookups that name nothing
 * - **MissingDependency**: a `dependencies.check` tool is not on PATH
 * - **OutputDir / BuildFailed / Archive**: the build of a single target
 * - **TaskFailed**: a shell command of a task list exited non-zero
 * - **Process**: spawning or waiting on a subprocess
 *
 * # Design Notes
 * - Uses `Cow<'static, str>` for efficient string storage
 * - Each message carries the target, task or field it concerns
 */
#[derive(Error, Debug)]
pub enum GoBuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error reading config file: {0}")]
    ConfigRead(Cow<'static, str>),

    #[error("Error parsing config: {0}")]
    ConfigParse(Cow<'static, str>),

    #[error("Error processing templates: {0}")]
    Template(Cow<'static, str>),

    #[error("Invalid config: {0}")]
    InvalidConfig(Cow<'static, str>),

    #[error("Config error: {0}")]
    Config(Cow<'static, str>),

    #[error("Unknown build target: {0}")]
    UnknownTarget(Cow<'static, str>),

    #[error("Unknown task: {0}")]
    UnknownTask(Cow<'static, str>),

    #[error("Missing dependency: {0}")]
    MissingDependency(Cow<'static, str>),

    #[error("Error creating output directory: {0}")]
    OutputDir(Cow<'static, str>),

    #[error("Build failed: {0}")]
    BuildFailed(Cow<'static, str>),

    #[error("Error creating zip file: {0}")]
    Archive(Cow<'static, str>),

    #[error("Task failed: {0}")]
    TaskFailed(Cow<'static, str>),

    #[error("Process error: {0}")]
    Process(Cow<'static, str>),
}

/** Constructor methods for the message-carrying variants
 *
 * # Usage Examples
 * ```ignore
 * use gobuilder::result::GoBuilderError;
 *
 * return Err(GoBuilderError::unknown_target("windows-arm64"));
 * return Err(GoBuilderError::task_failed(format!("{}: exit code 1", command)));
 * ```
 */
impl GoBuilderError {
    pub const EMPTY_TASK_NAME: &'static str = "Task name cannot be empty";

    pub fn config_read(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ConfigRead(msg.into())
    }

    pub fn config_parse(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ConfigParse(msg.into())
    }

    pub fn template(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Template(msg.into())
    }

    pub fn invalid_config(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn config(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unknown_target(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownTarget(msg.into())
    }

    pub fn unknown_task(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownTask(msg.into())
    }

    pub fn missing_dependency(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::MissingDependency(msg.into())
    }

    pub fn output_dir(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::OutputDir(msg.into())
    }

    pub fn build_failed(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BuildFailed(msg.into())
    }

    pub fn archive(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Archive(msg.into())
    }

    pub fn task_failed(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::TaskFailed(msg.into())
    }

    pub fn process(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Process(msg.into())
    }
}
