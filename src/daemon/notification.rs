//! Desktop notifications. The platform decides which kind of notification is available, and
//! that decision is made once through [PlatformNotifier::for_platform].
//!
//! Notifications are delegated to the tools every desktop already has: `notify-send` on Linux
//! and BSD, PowerShell on Windows, `osascript` on macOS. The reminder doesn't wait for the
//! command, the exit status is collected on tokio's blocking pool.

use std::{process::Command, time::Duration};

use anyhow::{anyhow, Result};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub message: String,
}

/// Intended to serve as a contract every notification mechanism implements.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, reminder: &Reminder) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// Notification shown with a title, a message and a display timeout.
#[derive(Debug, Clone)]
pub struct TimedNotifier {
    timeout: Duration,
}

impl TimedNotifier {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn command(&self, reminder: &Reminder) -> Command {
        timed_command(reminder, self.timeout)
    }
}

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        fn timed_command(reminder: &Reminder, timeout: Duration) -> Command {
            let script = format!(
                "Add-Type -AssemblyName System.Windows.Forms; \
                 $n = New-Object System.Windows.Forms.NotifyIcon; \
                 $n.Icon = [System.Drawing.SystemIcons]::Information; \
                 $n.Visible = $true; \
                 $n.ShowBalloonTip({ms}, '{title}', '{message}', 'Info'); \
                 Start-Sleep -Seconds {secs}; \
                 $n.Dispose()",
                ms = timeout.as_millis(),
                secs = timeout.as_secs(),
                title = reminder.title.replace('\'', "''"),
                message = reminder.message.replace('\'', "''"),
            );
            let mut command = Command::new("powershell");
            command.args(["-NoProfile", "-WindowStyle", "Hidden", "-Command", &script]);
            command
        }
    } else {
        fn timed_command(reminder: &Reminder, timeout: Duration) -> Command {
            let mut command = Command::new("notify-send");
            command
                .arg(format!("--expire-time={}", timeout.as_millis()))
                .arg(&reminder.title)
                .arg(&reminder.message);
            command
        }
    }
}

impl NotificationSink for TimedNotifier {
    fn notify(&self, reminder: &Reminder) -> Result<()> {
        spawn_detached(self.command(reminder)).map(|_| ())
    }
}

/// Notification shown with a title and a subtitle.
#[derive(Debug, Clone, Default)]
pub struct SubtitleNotifier;

impl SubtitleNotifier {
    pub fn command(&self, reminder: &Reminder) -> Command {
        let script = format!(
            "display notification \"\" with title \"{}\" subtitle \"{}\"",
            escape_apple_script(&reminder.title),
            escape_apple_script(&reminder.message)
        );
        let mut command = Command::new("osascript");
        command.arg("-e").arg(script);
        command
    }
}

impl NotificationSink for SubtitleNotifier {
    fn notify(&self, reminder: &Reminder) -> Result<()> {
        spawn_detached(self.command(reminder)).map(|_| ())
    }
}

fn escape_apple_script(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Spawns `command` and reaps it once it exits. Requires a tokio runtime.
fn spawn_detached(mut command: Command) -> Result<(u32, JoinHandle<()>)> {
    let handle =
        Handle::try_current().map_err(|e| anyhow!("Notifications need a tokio runtime {e}"))?;
    debug!("Spawning notification {:?}", command);
    let mut child = command.spawn()?;
    let pid = child.id();
    let waiter = handle.spawn_blocking(move || match child.wait() {
        Ok(status) => debug!("Notification {pid} exited with {status}"),
        Err(e) => warn!("Failed to wait for notification {pid} {e:?}"),
    });
    Ok((pid, waiter))
}

/// Serves as the notification sink chosen for the current platform.
#[derive(Debug, Clone)]
pub enum PlatformNotifier {
    Timed(TimedNotifier),
    Subtitle(SubtitleNotifier),
}

impl PlatformNotifier {
    pub fn for_platform(platform: Platform, timeout: Duration) -> Self {
        match platform {
            Platform::MacOs => PlatformNotifier::Subtitle(SubtitleNotifier),
            Platform::Other => PlatformNotifier::Timed(TimedNotifier::new(timeout)),
        }
    }
}

impl NotificationSink for PlatformNotifier {
    fn notify(&self, reminder: &Reminder) -> Result<()> {
        match self {
            PlatformNotifier::Timed(notifier) => notifier.notify(reminder),
            PlatformNotifier::Subtitle(notifier) => notifier.notify(reminder),
        }
    }
}

#[cfg(test)]
mod notification_tests {
    use std::{process::Command, time::Duration};

    use anyhow::Result;

    use crate::utils::logging::TEST_LOGGING;

    use super::{
        spawn_detached, Platform, PlatformNotifier, Reminder, SubtitleNotifier, TimedNotifier,
    };

    fn reminder() -> Reminder {
        Reminder {
            title: "Remainder".into(),
            message: "Please enter your \"mood\"".into(),
        }
    }

    #[test]
    fn platform_selects_notifier() {
        assert!(matches!(
            PlatformNotifier::for_platform(Platform::MacOs, Duration::from_secs(10)),
            PlatformNotifier::Subtitle(_)
        ));
        assert!(matches!(
            PlatformNotifier::for_platform(Platform::Other, Duration::from_secs(10)),
            PlatformNotifier::Timed(_)
        ));
    }

    #[test]
    fn subtitle_notifier_escapes_quotes() {
        let command = SubtitleNotifier.command(&reminder());
        assert_eq!(command.get_program(), "osascript");
        let args = command
            .get_args()
            .map(|v| v.to_string_lossy().to_string())
            .collect::<Vec<_>>();
        assert_eq!(args[0], "-e");
        assert_eq!(
            args[1],
            "display notification \"\" with title \"Remainder\" subtitle \"Please enter your \\\"mood\\\"\""
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn timed_notifier_passes_timeout() {
        let command = TimedNotifier::new(Duration::from_secs(10)).command(&reminder());
        assert_eq!(command.get_program(), "notify-send");
        let args = command
            .get_args()
            .map(|v| v.to_string_lossy().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            args,
            vec![
                "--expire-time=10000".to_string(),
                "Remainder".to_string(),
                "Please enter your \"mood\"".to_string(),
            ]
        );
    }

    #[test]
    fn spawning_needs_runtime() {
        assert!(spawn_detached(Command::new("true")).is_err());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn finished_commands_are_reaped() -> Result<()> {
        *TEST_LOGGING;
        let mut spawned = vec![];
        for _ in 0..3 {
            spawned.push(spawn_detached(Command::new("true"))?);
        }

        for (pid, waiter) in spawned {
            waiter.await?;
            // Zombies keep their /proc entry until they are waited on.
            assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
        }
        Ok(())
    }
}
