use crate::build::BuildTarget;
use crate::utils::CommandSpec;

/// Turns a fully-resolved target into a compiler invocation.
pub trait CompilerBackend {
    fn name(&self) -> &str;

    fn command(&self, target: &BuildTarget) -> CommandSpec;
}
