use crate::build::{BuildConfig, Executor};
use crate::cli::parser::CliParser;
use crate::result::Result;
use std::path::Path;

pub async fn execute(config_path: &Path, name: &str) -> Result<()> {
    let path = CliParser::validate_config_path(config_path)?;
    let config = BuildConfig::load(path).await?;

    log::info!("Running task list {}", name);
    let result = Executor::new(config).run_tasks(name).await;

    match &result {
        Ok(_) => log::info!("Task list {} finished", name),
        Err(e) => log::error!("Task list {} failed: {}", name, e),
    }

    result
}
