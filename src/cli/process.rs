use std::{env, path::Path, process::Command};

use anyhow::{anyhow, bail, Result};
use sysinfo::{get_current_pid, Signal, System};
use tracing::info;

use super::daemon_path::to_reminder_path;

/// Stops every running process started from `name`. Returns the amount of stopped processes.
pub fn kill_previous_reminders(name: &Path) -> Result<usize> {
    let system = System::new_all();
    let current_id = get_current_pid().map_err(|e| anyhow!("Can't get current pid {e}"))?;
    let mut killed = 0;
    for (pid, process) in system.processes().iter() {
        if *pid == current_id {
            continue;
        }

        if process
            .exe()
            .filter(|v| v.exists())
            .filter(|v| name == *v)
            .is_some()
        {
            // Forceful on Windows.
            if process.kill_with(Signal::Term).is_none() {
                process.kill();
            }
            process.wait();
            killed += 1;
        }
    }
    info!("Stopped {killed} reminder processes");
    Ok(killed)
}

/// Stops previous reminders and launches a new one. The reminder binary detaches by itself, so
/// this only waits for the launcher to exit.
pub fn restart_reminder(fire_times: &[String]) -> Result<()> {
    let reminder_path = to_reminder_path(env::current_exe()?);
    kill_previous_reminders(&reminder_path)?;

    let mut command = Command::new(&reminder_path);
    for at in fire_times {
        command.args(["--at", at]);
    }

    info!("Starting reminder {reminder_path:?}");
    let status = command.status()?;
    if !status.success() {
        bail!("Reminder exited with {status}");
    }
    Ok(())
}

/// Stops reminders started from the binary next to the cli.
pub fn stop_reminder() -> Result<usize> {
    kill_previous_reminders(&to_reminder_path(env::current_exe()?))
}
