//! Spawning of external commands, singly or as a two-stage pipeline.
//!
//! Both executors block until every child they spawned has exited, so the
//! caller never prompts again while a child is still running. Failure to
//! spawn (fork or pipe creation) is a recoverable error for the caller;
//! failure to *exec* is reported by the child itself and deliberately not
//! distinguished from a normal exit.

use anyhow::{Context, Result, bail};
use nix::sys::wait::{wait, waitpid};
use nix::unistd::{ForkResult, Pid, close, dup2, execvp, fork, pipe};
use std::ffi::CString;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

const NOT_FOUND_MSG: &[u8] = b"Command not found. Try again.\n";

/// Prepares an argv for `execvp`. Built before forking so the child does no
/// allocation between `fork` and `execvp`.
fn to_argv(tokens: &[&str]) -> Result<Vec<CString>> {
    if tokens.is_empty() {
        bail!("empty argument vector");
    }
    tokens
        .iter()
        .map(|t| CString::new(*t).with_context(|| format!("argument contains a NUL byte: {t:?}")))
        .collect()
}

/// Replaces the child image with `argv[0]`, resolving it on the search
/// path. On failure the child reports the fixed not-found notice and dies
/// with status 1; only raw-fd writes are used here since this runs in a
/// forked child of a possibly multithreaded parent.
fn exec_or_die(argv: &[CString]) -> ! {
    let _ = execvp(&argv[0], argv);
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            NOT_FOUND_MSG.as_ptr().cast(),
            NOT_FOUND_MSG.len(),
        );
        libc::_exit(1);
    }
}

/// Runs one external command to completion. The child's exit status is
/// discarded: a command that ran and failed still counts as handled.
pub fn run_command(tokens: &[&str]) -> Result<()> {
    let argv = to_argv(tokens)?;
    match unsafe { fork() }.context("failed to spawn child process")? {
        ForkResult::Child => exec_or_die(&argv),
        ForkResult::Parent { child } => {
            waitpid(child, None).context("failed to wait for child process")?;
            Ok(())
        }
    }
}

/// Which end of the channel a pipeline stage owns once spawned.
enum StageRole {
    /// Writes the channel: stdout is replaced by the write end.
    Producer,
    /// Reads the channel: stdin is replaced by the read end.
    Consumer,
}

fn redirect_or_die(from: RawFd, onto: RawFd) {
    if dup2(from, onto).is_err() {
        unsafe { libc::_exit(1) }
    }
}

/// Forks one stage. In the child, stdio is rewired onto the channel and
/// both original endpoints are closed before the image is replaced: after
/// `dup2` the only channel reference a stage may keep is the stdio
/// descriptor it actively uses, or the consumer would never see
/// end-of-stream.
fn spawn_stage(
    argv: &[CString],
    role: StageRole,
    read_end: &OwnedFd,
    write_end: &OwnedFd,
) -> Result<Pid> {
    match unsafe { fork() }.context("failed to spawn pipeline stage")? {
        ForkResult::Parent { child } => Ok(child),
        ForkResult::Child => {
            match role {
                StageRole::Producer => redirect_or_die(write_end.as_raw_fd(), libc::STDOUT_FILENO),
                StageRole::Consumer => redirect_or_die(read_end.as_raw_fd(), libc::STDIN_FILENO),
            }
            let _ = close(read_end.as_raw_fd());
            let _ = close(write_end.as_raw_fd());
            exec_or_die(argv)
        }
    }
}

/// Runs `producer | consumer` over one pipe and blocks until both stages
/// have exited. The orchestrating process never reads or writes the channel
/// itself; it closes both endpoints as soon as the stages are spawned and
/// then reaps two children without caring which finishes first.
pub fn run_pipeline(producer: &[&str], consumer: &[&str]) -> Result<()> {
    let producer = to_argv(producer)?;
    let consumer = to_argv(consumer)?;
    let (read_end, write_end) = pipe().context("failed to create pipe")?;

    let producer_pid = spawn_stage(&producer, StageRole::Producer, &read_end, &write_end)?;
    let spawned = spawn_stage(&consumer, StageRole::Consumer, &read_end, &write_end);

    drop(read_end);
    drop(write_end);

    if let Err(err) = spawned {
        // The producer is already running against a now-severed channel;
        // reap it before reporting the spawn failure.
        let _ = waitpid(producer_pid, None);
        return Err(err);
    }

    wait().context("failed to wait for pipeline stage")?;
    wait().context("failed to wait for pipeline stage")?;
    Ok(())
}
