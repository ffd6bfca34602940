pub mod build;
pub mod init;
pub mod targets;
pub mod task;

use crate::result::Result;
use smol_str::SmolStr;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CommandType {
    Build { config: PathBuf, target: SmolStr },
    Init { config: PathBuf, force: bool },
    Task { config: PathBuf, name: SmolStr },
    Targets { config: PathBuf },
}

impl CommandType {
    pub async fn execute(self) -> Result<()> {
        match self {
            CommandType::Build { config, target } => build::execute(&config, &target).await,
            CommandType::Init { config, force } => init::execute(&config, force).await,
            CommandType::Task { config, name } => task::execute(&config, &name).await,
            CommandType::Targets { config } => targets::execute(&config).await,
        }
    }
}

#[derive(Default)]
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn build_project(&mut self, config: PathBuf, target: String) -> Result<()> {
        CommandType::Build {
            config,
            target: crate::cli::parser::CliParser::resolve_target(&target),
        }
        .execute()
        .await
    }

    pub async fn init_project(&mut self, config: PathBuf, force: bool) -> Result<()> {
        CommandType::Init { config, force }.execute().await
    }

    pub async fn run_task(&mut self, config: PathBuf, name: String) -> Result<()> {
        CommandType::Task {
            config,
            name: crate::cli::parser::CliParser::validate_task_name(&name)?,
        }
        .execute()
        .await
    }

    pub async fn list_targets(&mut self, config: PathBuf) -> Result<()> {
        CommandType::Targets { config }.execute().await
    }
}
