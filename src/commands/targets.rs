use crate::build::{BuildConfig, BuildTarget, ALL_TARGETS, DEFAULT_TARGET};
use crate::cli::parser::CliParser;
use crate::result::Result;
use std::path::Path;

pub async fn execute(config_path: &Path) -> Result<()> {
    let path = CliParser::validate_config_path(config_path)?;
    let config = BuildConfig::load(path).await?;

    for line in describe_targets(&config) {
        println!("{}", line);
    }
    Ok(())
}

pub fn describe_targets(config: &BuildConfig) -> Vec<String> {
    let mut lines = vec![describe(DEFAULT_TARGET, &config.build.default)];

    for (name, target) in &config.build.targets {
        if name == ALL_TARGETS {
            lines.push(format!("{:<16} {}", name, target.platforms.join(", ")));
        } else {
            lines.push(describe(name, target));
        }
    }

    lines
}

fn describe(name: &str, target: &BuildTarget) -> String {
    let mut line = format!(
        "{:<16} {}/{} -> {}",
        name, target.os, target.arch, target.output
    );
    if !target.tags.is_empty() {
        line.push_str(&format!(" [tags: {}]", target.tags.join(",")));
    }
    if target.cgo {
        line.push_str(" [cgo]");
    }
    line
}
