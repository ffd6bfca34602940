/// gobuilder - a configuration-driven build orchestrator for Go projects
///
/// A declarative file names build targets (OS/architecture pairs, output
/// paths, linker flags, build tags) and task lists run before and after the
/// build. gobuilder resolves a target, invokes the Go toolchain, optionally
/// zips the artifact and runs the task lists, stopping at the first failure.
///
/// Main modules:
/// - build: config loading, templating, the executor and zip packaging
/// - cli: command-line interface parsing and execution
/// - commands: the build pipeline and the init/task/targets subcommands
/// - compiler: compiler backend abstraction and the Go toolchain
/// - result: error handling and result types
/// - utils: subprocess execution
pub mod build;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod result;
pub mod utils;
