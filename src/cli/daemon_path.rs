use std::path::PathBuf;

/// Reminder binary is expected to be installed next to the cli.
pub fn to_reminder_path(mut path: PathBuf) -> PathBuf {
    path.set_file_name("moodly-reminder");
    #[cfg(windows)]
    {
        path.set_extension("exe");
    }
    path
}
