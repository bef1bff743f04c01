//! The interactive session loop: read, record, dispatch, repeat.

use crate::builtin;
use crate::command::CommandFactory;
use crate::env::Environment;
use crate::executor;
use crate::history::HistoryLog;
use crate::lexer::{self, MAX_COMMAND_TOKENS, MAX_STAGE_TOKENS};
use anyhow::{Context, Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io;

/// Longest accepted command line in bytes, newline excluded.
pub const MAX_LINE_BYTES: usize = 79;

/// An interactive shell session.
///
/// The loop is strictly synchronous: it never prompts again until every
/// child of the previous command or pipeline has exited.
pub struct Shell {
    editor: DefaultEditor,
    history: HistoryLog,
    builtins: Vec<Box<dyn CommandFactory>>,
    env: Environment,
}

impl Shell {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new().context("failed to initialize line editor")?,
            history: HistoryLog::new(),
            builtins: builtin::default_factories(),
            env: Environment::new(),
        })
    }

    /// Runs the session until `exit`, end of input, or an interrupt.
    /// Returning (instead of exiting in place) lets the history drop before
    /// the process ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let prompt = format!("{}@mini-shell> ", self.env.username());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(err) = self.handle_line(&line) {
                        eprintln!("mini-shell: {err:#}");
                    }
                    if self.env.should_exit {
                        return Ok(());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Raw mode delivers Ctrl-C here instead of raising
                    // SIGINT; mirror the handler's notice and exit code.
                    println!("Minishell terminated.");
                    return Ok(());
                }
                Err(ReadlineError::Eof) => return Ok(()),
                Err(err) => return Err(err).context("failed to read command line"),
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<()> {
        if line.is_empty() {
            println!("Enter a valid command.");
            return Ok(());
        }
        if line.len() > MAX_LINE_BYTES {
            bail!("command line exceeds {MAX_LINE_BYTES} bytes");
        }

        // Recorded before any interpretation, malformed lines included.
        self.history.append(line);
        let _ = self.editor.add_history_entry(line);

        if let Some((producer, consumer)) = lexer::split_pipeline(line)? {
            let producer = lexer::split_bounded(producer, " ", MAX_STAGE_TOKENS)?;
            let consumer = lexer::split_bounded(consumer, " ", MAX_STAGE_TOKENS)?;
            return executor::run_pipeline(&producer, &consumer);
        }

        let tokens = lexer::split_bounded(line, " ", MAX_COMMAND_TOKENS)?;
        let Some((&name, args)) = tokens.split_first() else {
            // Nothing but delimiters.
            println!("Enter a valid command.");
            return Ok(());
        };

        if name == "history" {
            return self
                .history
                .print_all(&mut io::stdout())
                .context("failed to print history");
        }

        for factory in &self.builtins {
            if let Some(cmd) = factory.try_create(name, args) {
                return cmd.execute(&mut io::stdout(), &mut io::stderr(), &mut self.env);
            }
        }

        executor::run_command(&tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::new().unwrap()
    }

    #[test]
    fn empty_line_is_not_recorded() {
        let mut sh = shell();
        sh.handle_line("").unwrap();
        assert!(sh.history.is_empty());
    }

    #[test]
    fn overlong_line_is_rejected_and_not_recorded() {
        let mut sh = shell();
        let long = "x".repeat(MAX_LINE_BYTES + 1);
        assert!(sh.handle_line(&long).is_err());
        assert!(sh.history.is_empty());
    }

    #[test]
    fn longest_legal_line_is_accepted() {
        let mut sh = shell();
        // A cd to a nonexistent target stays in-process and is silent, so
        // the edge length can be probed without spawning anything.
        let edge = format!("cd {}", "x".repeat(MAX_LINE_BYTES - 3));
        assert_eq!(edge.len(), MAX_LINE_BYTES);
        sh.handle_line(&edge).unwrap();
        assert_eq!(sh.history.len(), 1);
    }

    #[test]
    fn lines_are_recorded_before_dispatch() {
        let mut sh = shell();
        sh.handle_line("help").unwrap();
        sh.handle_line("history").unwrap();
        assert_eq!(sh.history.len(), 2);
    }

    #[test]
    fn malformed_pipeline_is_a_loud_error_but_still_recorded() {
        let mut sh = shell();
        assert!(sh.handle_line("a | b | c").is_err());
        assert!(sh.handle_line("ls |").is_err());
        assert_eq!(sh.history.len(), 2);
    }

    #[test]
    fn exit_requests_shutdown() {
        let mut sh = shell();
        sh.handle_line("exit").unwrap();
        assert!(sh.env.should_exit);
    }

    #[test]
    fn whitespace_only_line_is_diagnosed() {
        let mut sh = shell();
        sh.handle_line("   ").unwrap();
        assert_eq!(sh.history.len(), 1);
    }
}
