use crate::build::DEFAULT_TARGET;
use crate::result::{GoBuilderError, Result};
use smol_str::SmolStr;
use std::path::{Path, PathBuf};

pub struct CliParser;

impl CliParser {
    pub fn validate_config_path(path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(GoBuilderError::config_read(format!(
                "{} not found. Run 'gobuilder init' to create it.",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(GoBuilderError::config_read(format!(
                "{} is not a file",
                path.display()
            )));
        }

        Ok(path.to_path_buf())
    }

    /// An empty `--target` selects the `default` target.
    pub fn resolve_target(target: &str) -> SmolStr {
        let target = target.trim();
        if target.is_empty() {
            SmolStr::new_static(DEFAULT_TARGET)
        } else {
            SmolStr::new(target)
        }
    }

    pub fn validate_task_name(name: &str) -> Result<SmolStr> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GoBuilderError::unknown_task(GoBuilderError::EMPTY_TASK_NAME));
        }
        Ok(SmolStr::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_target_means_default() {
        assert_eq!(CliParser::resolve_target(""), "default");
        assert_eq!(CliParser::resolve_target("  "), "default");
        assert_eq!(CliParser::resolve_target("all"), "all");
    }

    #[test]
    fn config_path_must_be_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliParser::validate_config_path(dir.path()).unwrap_err();
        assert!(matches!(err, GoBuilderError::ConfigRead(_)));

        let missing = dir.path().join("build-config.yaml");
        let err = CliParser::validate_config_path(&missing).unwrap_err();
        assert!(err.to_string().contains("gobuilder init"));
    }

    #[test]
    fn task_name_cannot_be_blank() {
        assert!(CliParser::validate_task_name(" ").is_err());
        assert_eq!(CliParser::validate_task_name("lint").unwrap(), "lint");
    }
}
