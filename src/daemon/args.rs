use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;


#[derive(Parser)]
#[command(name = "moodly-reminder", version, about = "Reminds you to log your mood")]
pub struct ReminderArgs {
  /// Run in the current process instead of detaching.
  #[arg(long)]
  pub force: bool,
  #[arg(long)]
  pub dir: Option<PathBuf>,
  /// This option is for debugging purposes only.
  #[arg(long = "log-console")]
  pub log_console : bool,
  #[arg(long = "log-filter")]
  pub log: Option<LevelFilter>,
  /// Time of day to send a reminder at. Can be repeated. Defaults to 17:50 and 17:52.
  #[arg(long = "at", value_name = "HH:MM")]
  pub fire_times: Vec<String>,
}
