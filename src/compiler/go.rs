use crate::build::BuildTarget;
use crate::compiler::CompilerBackend;
use crate::utils::CommandSpec;

pub const GO_BINARY: &str = "go";

/// The Go toolchain: `go build` driven by `GOOS`, `GOARCH` and `CGO_ENABLED`.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    program: String,
    package: String,
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self {
            program: GO_BINARY.to_string(),
            package: ".".to_string(),
        }
    }
}

impl GoToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }
}

impl CompilerBackend for GoToolchain {
    fn name(&self) -> &str {
        &self.program
    }

    fn command(&self, target: &BuildTarget) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.program)
            .arg("build")
            .env("GOOS", &target.os)
            .env("GOARCH", &target.arch)
            .env("CGO_ENABLED", if target.cgo { "1" } else { "0" });

        if !target.ldflags.is_empty() {
            spec = spec.arg("-ldflags").arg(&target.ldflags);
        }

        if !target.tags.is_empty() {
            spec = spec.arg("-tags").arg(target.tags.join(","));
        }

        spec.arg("-o").arg(&target.output).arg(&self.package)
    }
}
