use crate::build::template;
use crate::result::{GoBuilderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

pub const DEFAULT_CONFIG_FILE: &str = "build-config.yaml";
pub const DEFAULT_TARGET: &str = "default";
pub const ALL_TARGETS: &str = "all";
pub const PRE_BUILD_TASK: &str = "pre-build";
pub const POST_BUILD_TASK: &str = "post-build";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub zip: bool,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub dependencies: DependencyConfig,
    #[serde(default)]
    pub tasks: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default)]
    pub default: BuildTarget,
    #[serde(default)]
    pub targets: BTreeMap<String, BuildTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildTarget {
    pub os: String,
    pub arch: String,
    pub output: String,
    pub ldflags: String,
    pub tags: Vec<String>,
    pub cgo: bool,
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConfig {
    #[serde(default)]
    pub check: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        let mut targets = BTreeMap::new();
        targets.insert(
            "linux-amd64".to_string(),
            BuildTarget::new("linux", "amd64", "dist/{{.Project}}-{{.Version}}-linux-amd64"),
        );
        targets.insert(
            "darwin-arm64".to_string(),
            BuildTarget::new("darwin", "arm64", "dist/{{.Project}}-{{.Version}}-darwin-arm64"),
        );
        targets.insert(
            ALL_TARGETS.to_string(),
            BuildTarget {
                platforms: vec!["linux-amd64".to_string(), "darwin-arm64".to_string()],
                ..Default::default()
            },
        );

        let mut tasks = BTreeMap::new();
        tasks.insert(PRE_BUILD_TASK.to_string(), vec!["go mod tidy".to_string()]);
        tasks.insert(
            POST_BUILD_TASK.to_string(),
            vec!["echo Built {{.Project}} {{.Version}}".to_string()],
        );

        Self {
            project: "app".to_string(),
            version: "0.1.0".to_string(),
            zip: false,
            build: BuildSettings {
                default: BuildTarget {
                    ldflags: "-s -w -X main.version={{.Version}}".to_string(),
                    ..BuildTarget::new("linux", "amd64", "bin/{{.Project}}")
                },
                targets,
            },
            dependencies: DependencyConfig {
                check: vec!["go".to_string()],
            },
            tasks,
        }
    }
}

impl BuildConfig {
    /** Loads a fully resolved configuration
     *
     * # Process Flow
     * 1. Read the file (`ConfigRead` on failure)
     * 2. Parse it as TOML for `.toml` paths, YAML otherwise (`ConfigParse`)
     * 3. Resolve placeholders (`Template`)
     * 4. Check the `all` platform list (`InvalidConfig`)
     */
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            GoBuilderError::config_read(format!("{}: {}", path.display(), e))
        })?;

        let mut config = Self::parse(&content, ConfigFormat::from_path(path))?;
        config.process_templates()?;
        config.validate()?;

        log::info!(
            "Loaded config for {} {} from {}",
            config.project,
            config.version,
            path.display()
        );

        Ok(config)
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| GoBuilderError::config_parse(e.to_string())),
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| GoBuilderError::config_parse(e.to_string()))
            }
        }
    }

    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| {
                GoBuilderError::config(format!("Failed to serialize build config: {}", e))
            })?,
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| {
                GoBuilderError::config(format!("Failed to serialize build config: {}", e))
            })?,
        };

        fs::write(path, content).await?;
        Ok(())
    }

    /** Resolves placeholders in target outputs, ldflags and task commands
     *
     * # Notes
     * - Every field is evaluated against the config as parsed, so the result
     *   does not depend on the order fields are visited in
     * - Errors name the target and field, or the task and command number
     */
    pub fn process_templates(&mut self) -> Result<()> {
        let context = serde_json::to_value(&*self).map_err(|e| {
            GoBuilderError::template(format!("Failed to build template context: {}", e))
        })?;

        self.build
            .default
            .process_templates(&context)
            .map_err(|e| GoBuilderError::template(format!("default target {}", e)))?;

        for (name, target) in self.build.targets.iter_mut() {
            target
                .process_templates(&context)
                .map_err(|e| GoBuilderError::template(format!("target {} {}", name, e)))?;
        }

        for (task_name, commands) in self.tasks.iter_mut() {
            for (index, command) in commands.iter_mut().enumerate() {
                *command = template::render(command, &context).map_err(|e| {
                    GoBuilderError::template(format!(
                        "task {} command {}: {}",
                        task_name,
                        index + 1,
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(all) = self.build.targets.get(ALL_TARGETS) {
            for platform in &all.platforms {
                if platform == ALL_TARGETS {
                    return Err(GoBuilderError::invalid_config(
                        "target 'all' cannot list itself as a platform",
                    ));
                }
                if platform != DEFAULT_TARGET && !self.build.targets.contains_key(platform) {
                    return Err(GoBuilderError::invalid_config(format!(
                        "target 'all' lists unknown platform '{}'",
                        platform
                    )));
                }
            }
        }

        Ok(())
    }

    /// Looks up a single buildable target; `default` maps to `build.default`.
    pub fn target(&self, name: &str) -> Result<&BuildTarget> {
        if name == DEFAULT_TARGET {
            return Ok(&self.build.default);
        }

        self.build
            .targets
            .get(name)
            .ok_or_else(|| GoBuilderError::unknown_target(name.to_string()))
    }

    pub fn task(&self, name: &str) -> Option<&[String]> {
        self.tasks.get(name).map(Vec::as_slice)
    }
}

impl BuildTarget {
    pub fn new(os: &str, arch: &str, output: &str) -> Self {
        Self {
            os: os.to_string(),
            arch: arch.to_string(),
            output: output.to_string(),
            ..Default::default()
        }
    }

    pub fn output_path(&self) -> &Path {
        Path::new(&self.output)
    }

    /// Checks the fields a compiler invocation cannot do without.
    pub fn validate(&self, name: &str) -> Result<()> {
        let missing = [
            ("os", self.os.is_empty()),
            ("arch", self.arch.is_empty()),
            ("output", self.output.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, empty)| empty.then_some(field))
        .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GoBuilderError::invalid_config(format!(
                "target '{}' is missing {}",
                name,
                missing.join(", ")
            )))
        }
    }

    fn process_templates(&mut self, context: &serde_json::Value) -> std::result::Result<(), String> {
        self.output = template::render(&self.output, context)
            .map_err(|e| format!("output: {}", e))?;
        self.ldflags = template::render(&self.ldflags, context)
            .map_err(|e| format!("ldflags: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
project: foo
version: "1.2"
zip: true
build:
  default:
    os: linux
    arch: amd64
    output: bin/{{.Project}}
    ldflags: -X main.version={{.Version}}
  targets:
    linux-amd64:
      os: linux
      arch: amd64
      output: dist/{{.Project}}-{{.Version}}-linux
      tags: [netgo, osusergo]
    darwin-arm64:
      os: darwin
      arch: arm64
      output: dist/{{ .Project }}-darwin
      cgo: true
    all:
      platforms: [linux-amd64, darwin-arm64]
dependencies:
  check: [go]
tasks:
  pre-build:
    - echo {{.Project}}
    - go vet ./...
"#;

    fn sample() -> BuildConfig {
        let mut config = BuildConfig::parse(SAMPLE, ConfigFormat::Yaml).unwrap();
        config.process_templates().unwrap();
        config
    }

    #[test]
    fn parses_yaml_schema() {
        let config = BuildConfig::parse(SAMPLE, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.project, "foo");
        assert_eq!(config.version, "1.2");
        assert!(config.zip);
        assert_eq!(config.dependencies.check, vec!["go"]);
        assert_eq!(config.build.targets["linux-amd64"].tags, vec!["netgo", "osusergo"]);
        assert!(config.build.targets["darwin-arm64"].cgo);
        assert_eq!(
            config.build.targets["all"].platforms,
            vec!["linux-amd64", "darwin-arm64"]
        );
    }

    #[test]
    fn templates_resolve_against_config() {
        let config = sample();
        assert_eq!(config.build.default.output, "bin/foo");
        assert_eq!(config.build.default.ldflags, "-X main.version=1.2");
        assert_eq!(config.build.targets["linux-amd64"].output, "dist/foo-1.2-linux");
        assert_eq!(config.build.targets["darwin-arm64"].output, "dist/foo-darwin");
        assert_eq!(config.tasks["pre-build"], vec!["echo foo", "go vet ./..."]);
    }

    #[test]
    fn default_target_is_build_default() {
        let config = sample();
        assert_eq!(config.target("default").unwrap(), &config.build.default);
    }

    #[test]
    fn unknown_target_is_reported() {
        let err = sample().target("nonexistent").unwrap_err();
        assert!(matches!(err, GoBuilderError::UnknownTarget(_)));
    }

    #[test]
    fn template_errors_name_the_field() {
        let yaml = "project: foo\nbuild:\n  targets:\n    web:\n      output: bin/{{.Nope}}\n";
        let mut config = BuildConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        let err = config.process_templates().unwrap_err();
        assert!(matches!(err, GoBuilderError::Template(_)));
        assert!(err.to_string().contains("target web output"), "{err}");

        let yaml = "tasks:\n  release:\n    - echo ok\n    - echo {{.Project\n";
        let mut config = BuildConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        let err = config.process_templates().unwrap_err();
        assert!(err.to_string().contains("task release command 2"), "{err}");
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = BuildConfig::parse("build: [unclosed", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, GoBuilderError::ConfigParse(_)));
    }

    #[test]
    fn all_must_reference_existing_targets() {
        let yaml = "build:\n  targets:\n    all:\n      platforms: [linux-amd64, ghost]\n    linux-amd64:\n      os: linux\n";
        let config = BuildConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ghost"), "{err}");

        let yaml = "build:\n  targets:\n    all:\n      platforms: [all]\n";
        let config = BuildConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_is_chosen_by_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("b.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("b.yml")), ConfigFormat::Yaml);

        let toml = r#"
project = "foo"
version = "2.0"

[build.default]
os = "linux"
arch = "arm64"
output = "bin/{{.Project}}"
"#;
        let config = BuildConfig::parse(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.build.default.arch, "arm64");
    }

    #[test]
    fn target_validation_lists_missing_fields() {
        let err = BuildTarget::default().validate("web").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid config: target 'web' is missing os, arch, output"
        );
        assert!(BuildTarget::new("linux", "amd64", "bin/x").validate("x").is_ok());
    }

    #[tokio::test]
    async fn load_reports_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = BuildConfig::load(dir.path().join("missing.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, GoBuilderError::ConfigRead(_)));
    }

    #[tokio::test]
    async fn starter_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        BuildConfig::default().save_to_file(&path).await.unwrap();

        let config = BuildConfig::load(&path).await.unwrap();
        assert_eq!(config.build.default.output, "bin/app");
        assert_eq!(config.tasks["post-build"], vec!["echo Built app 0.1.0"]);
    }
}
