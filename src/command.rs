use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Object-safe trait for any command the shell can run in-process.
///
/// Implemented by built-ins via a blanket impl. A command that reports a
/// user-level problem itself (and leaves the session able to continue)
/// returns `Ok`; an `Err` is surfaced by the session loop.
pub trait ExecutableCommand {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`; the first
/// factory in the registry that recognizes it wins.
pub trait CommandFactory {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
