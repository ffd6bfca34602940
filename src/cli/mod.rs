pub mod parser;

use crate::build::DEFAULT_CONFIG_FILE;
use crate::commands::CommandExecutor;
use crate::result::{GoBuilderError, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gobuilder")]
#[command(about = "Build the project for a specific target, or the default target if none is given")]
#[command(version = "0.1.0")]
#[command(author = "mxp96")]
#[command(
    help_template = "{before-help}{name} v{version}\nAuthor: {author}\n\n{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}"
)]
pub struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE, help = "Build configuration file")]
    config: PathBuf,

    #[arg(
        long,
        default_value = "",
        help = "Build target to use (default is 'default'); not accepted with a subcommand"
    )]
    target: String,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
pub enum Commands {
    #[command(about = "Write a starter build configuration")]
    Init {
        #[arg(long, help = "Force overwrite an existing configuration")]
        force: bool,
    },

    #[command(about = "Run a named task list")]
    Task {
        #[arg(help = "Task list name from the tasks section")]
        name: String,
    },

    #[command(about = "List the configured build targets")]
    Targets,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Task { .. } => "task",
            Commands::Targets => "targets",
        }
    }
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self) -> Result<()> {
        if let Some(command) = &self.command {
            if !self.target.is_empty() {
                return Err(GoBuilderError::config(format!(
                    "--target only applies to the build and cannot be used with '{}'",
                    command.name()
                )));
            }
        }

        let mut executor = CommandExecutor::new();

        match self.command {
            None => executor.build_project(self.config, self.target).await,
            Some(Commands::Init { force }) => executor.init_project(self.config, force).await,
            Some(Commands::Task { name }) => executor.run_task(self.config, name).await,
            Some(Commands::Targets) => executor.list_targets(self.config).await,
        }
    }
}
