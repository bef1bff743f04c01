use anyhow::Result;
use mini_shell::Shell;
use mini_shell::signal;

fn main() -> Result<()> {
    // The watchdog goes first so nothing can run unbounded before it is
    // armed.
    signal::arm_watchdog();
    signal::install_interrupt_handler()?;

    Shell::new()?.run()
}
