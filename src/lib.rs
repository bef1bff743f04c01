//! A small interactive shell built around a synchronous command execution
//! engine.
//!
//! Each iteration reads one line, records it in the session history, and
//! dispatches it to a built-in command, an external program, or a two-stage
//! pipeline of external programs connected by a pipe. The loop never prompts
//! again until every child of the previous command has exited.
//!
//! The main entry point is [`Shell`]; the [`signal`] module carries the
//! startup watchdog and interrupt policy that bounds the process lifetime.

mod builtin;
mod command;
mod env;
mod executor;
mod history;
mod lexer;
mod repl;
pub mod signal;

pub use repl::Shell;
