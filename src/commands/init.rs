use crate::build::BuildConfig;
use crate::result::{GoBuilderError, Result};
use std::path::Path;

pub async fn execute(config_path: &Path, force: bool) -> Result<()> {
    let mut cmd = InitCommand::new();
    cmd.execute(config_path, force).await
}

#[derive(Default)]
pub struct InitCommand;

impl InitCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&mut self, config_path: &Path, force: bool) -> Result<()> {
        log::info!(
            "Writing starter config to {} (force: {})",
            config_path.display(),
            force
        );

        if config_path.exists() && !force {
            log::warn!("{} already exists, init aborted", config_path.display());
            return Err(GoBuilderError::config(format!(
                "{} already exists. Use --force to overwrite.",
                config_path.display()
            )));
        }

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        BuildConfig::default().save_to_file(config_path).await?;

        println!("{} created successfully!", config_path.display());
        println!();
        println!("Please edit it to match your project:");
        println!("   - Set project and version");
        println!("   - Adjust the default target and named targets");
        println!("   - List the platforms built by the 'all' target");
        println!("   - Add pre-build and post-build tasks");
        println!();
        println!("Then run: gobuilder --target all");

        log::info!("Init completed successfully");
        Ok(())
    }
}
