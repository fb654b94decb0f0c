pub mod daemon_path;
pub mod presenter;
pub mod process;
pub mod quotes;
pub mod session;

use std::io::{stdin, stdout, IsTerminal};

use anyhow::Result;
use clap::{Parser, Subcommand};
use presenter::TerminalPresenter;
use process::{restart_reminder, stop_reminder};
use session::Session;
use tracing::level_filters::LevelFilter;

use crate::{
    daemon::start_reminder,
    mood::{collector::EntryCollector, store::MoodLog},
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
        runtime::single_thread_runtime,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Moodly", version, long_about = None)]
#[command(about = "Track your mood and see how your week went", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Record moods and look at weekly insights")]
    Session,
    #[command(about = "Starts the reminder daemon")]
    Init {
        #[arg(long = "at", value_name = "HH:MM", help = "Time of day to send a reminder at")]
        fire_times: Vec<String>,
    },
    #[command(about = "Stop currently running reminder daemon")]
    Stop,
    #[command(
        about = "Run the reminder directly in current console. Useful for debugging notifications"
    )]
    Remind {
        #[arg(long = "at", value_name = "HH:MM", help = "Time of day to send a reminder at")]
        fire_times: Vec<String>,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        CLI_PREFIX,
        &create_application_default_path()?,
        logging_level,
        args.log,
    )?;

    match args.commands {
        Commands::Session => {
            let output = stdout();
            let styled = output.is_terminal();
            let mut session = Session::new(
                TerminalPresenter::new(stdin().lock(), output, styled),
                EntryCollector::new(MoodLog::new()),
                Box::new(DefaultClock),
                rand::thread_rng(),
            );
            session.run()
        }
        Commands::Init { fire_times } => restart_reminder(&fire_times),
        Commands::Stop => {
            let stopped = stop_reminder()?;
            println!("Stopped {stopped} reminders");
            Ok(())
        }
        Commands::Remind { fire_times } => {
            single_thread_runtime()?.block_on(start_reminder(&fire_times))
        }
    }
}
