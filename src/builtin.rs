use crate::command::{CommandFactory, ExecutableCommand};
use crate::env::Environment;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    fn execute(
        self,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        T::execute(*self, stdout, stderr, env)
    }
}

/// Fallback command created when a built-in's arguments don't parse; it
/// prints the generated usage text and still counts as handled.
struct BadUsage {
    output: String,
}

impl ExecutableCommand for BadUsage {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<()> {
        stdout.write_all(self.output.as_bytes())?;
        Ok(())
    }
}

/// Turns any [`BuiltinCommand`] type into a [`CommandFactory`].
pub(crate) struct Factory<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() {
            return None;
        }
        Some(match T::from_args(&[name], args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, .. }) => Box::new(BadUsage { output }),
        })
    }
}

/// The fixed registry, in lookup order.
pub(crate) fn default_factories() -> Vec<Box<dyn CommandFactory>> {
    vec![
        Box::new(Factory::<Cd>::default()),
        Box::new(Factory::<Help>::default()),
        Box::new(Factory::<Exit>::default()),
    ]
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<()> {
        match &self.target {
            None => writeln!(stderr, "must provide a directory.")?,
            // A failed chdir is not reported; the working directory stays put.
            Some(target) => {
                let _ = env::set_current_dir(Path::new(target));
            }
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Print the commands this shell handles itself.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<()> {
        writeln!(stdout, "========Welcome to minishell========")?;
        writeln!(stdout, "Built-in functions in this minishell:")?;
        writeln!(stdout, "- cd")?;
        writeln!(stdout, "- exit")?;
        writeln!(stdout, "- help")?;
        writeln!(stdout, "- history")?;
        writeln!(stdout, "Use man for details of other commands.")?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// trailing arguments are accepted and ignored
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<()> {
        writeln!(stdout, "Bye")?;
        // The loop tears the session down, so the history is released
        // before the process actually ends.
        env.should_exit = true;
        Ok(())
    }
}
