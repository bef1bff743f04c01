//! Startup policy bounding the process lifetime: an absolute watchdog
//! deadline and an interrupt override.

use anyhow::{Context, Result};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use nix::unistd::alarm;

/// Absolute wall-clock deadline for the whole session, in seconds. If it
/// expires the process dies with the default SIGALRM disposition, which
/// also kills a runaway fork loop's ancestor.
pub const WATCHDOG_SECS: u32 = 180;

const TERM_NOTICE: &[u8] = b"Minishell terminated.\n";

extern "C" fn on_interrupt(_signum: libc::c_int) {
    // Signal context: only async-signal-safe calls. The history is not
    // released on this path; the kernel reclaims everything anyway.
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            TERM_NOTICE.as_ptr().cast(),
            TERM_NOTICE.len(),
        );
        libc::_exit(0);
    }
}

/// Arms the self-destruct timer. Must run before anything that can spawn a
/// process so no child tree outlives the deadline.
pub fn arm_watchdog() {
    alarm::set(WATCHDOG_SECS);
}

/// Overrides SIGINT to print the termination notice and exit 0 on the
/// spot, bypassing normal cleanup.
pub fn install_interrupt_handler() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_interrupt),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe { sigaction(Signal::SIGINT, &action) }.context("failed to install SIGINT handler")?;
    Ok(())
}
