// Keeps Windows from opening a console for the reminder. Comment out to see stdout.
#![windows_subsystem = "windows"]

use std::env::args;

use anyhow::Result;
use clap::Parser;
use moodly::{
    daemon::{args::ReminderArgs, start_reminder},
    utils::{
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, REMINDER_PREFIX},
        runtime::single_thread_runtime,
    },
};

fn main() -> Result<()> {
    let command_args = args().collect::<Vec<_>>();
    let args = ReminderArgs::parse_from(&command_args);

    if !args.force && detach(command_args)? {
        return Ok(());
    }
    run(args)
}

/// Moves the reminder into the background. Returns `true` in the launching process, which should
/// exit right away, and `false` in the process that keeps running the reminder.
#[allow(unused_variables, unreachable_code)]
fn detach(command_args: Vec<String>) -> Result<bool> {
    #[cfg(feature = "win")]
    {
        use std::{os::windows::process::CommandExt, process::Stdio};
        use windows::Win32::System::Threading::DETACHED_PROCESS;

        let mut command = std::process::Command::new(std::env::current_exe()?);
        command
            .args(command_args.into_iter().skip(1))
            .arg("--force")
            .creation_flags(DETACHED_PROCESS.0)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        // The launcher exits immediately, the detached child is adopted by the system.
        #[allow(clippy::zombie_processes)]
        command.spawn()?;
        println!("Reminder started in the background");
        return Ok(true);
    }
    #[cfg(unix)]
    {
        use daemonize::{Daemonize, Outcome};
        use tracing::error;

        let outcome = Daemonize::new()
            .stdout(daemonize::Stdio::devnull())
            .stderr(daemonize::Stdio::devnull())
            .execute();
        return match outcome {
            Outcome::Parent(parent) => {
                parent.inspect_err(|e| error!("Reminder failed to daemonize {e:?}"))?;
                println!("Reminder started in the background");
                Ok(true)
            }
            Outcome::Child(child) => {
                child.inspect_err(|e| error!("Reminder daemon failed to start {e:?}"))?;
                Ok(false)
            }
        };
    }
    Ok(false)
}

fn run(args: ReminderArgs) -> Result<()> {
    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;
    enable_logging(REMINDER_PREFIX, &app_dir, args.log, args.log_console)?;
    single_thread_runtime()?.block_on(start_reminder(&args.fire_times))
}
