use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::{DateTime, Local};
use notification::{NotificationSink, Platform, PlatformNotifier, Reminder};
use scheduler::Scheduler;
use tracing::{debug, info, warn};

use crate::utils::clock::{Clock, DefaultClock};

pub mod args;
pub mod notification;
pub mod scheduler;

pub const DEFAULT_FIRE_TIMES: [&str; 2] = ["17:50", "17:52"];
pub const REMINDER_TITLE: &str = "Remainder";
pub const REMINDER_MESSAGE: &str = "Please enter your mood";

const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Represents the starting point for the reminder daemon. Only returns if the fire times can't
/// be registered, otherwise runs until the process is killed.
pub async fn start_reminder(fire_times: &[String]) -> Result<()> {
    let platform = Platform::current();
    info!("Starting reminder daemon on {platform:?}");

    let sink = Arc::new(PlatformNotifier::for_platform(platform, NOTIFICATION_TIMEOUT));
    let clock = DefaultClock;
    let scheduler = create_scheduler(fire_times, sink, clock.now())?;

    run_reminder_loop(scheduler, &clock).await
}

/// Registers a reminder for every fire time. Falls back to [DEFAULT_FIRE_TIMES] when none are
/// given.
pub fn create_scheduler(
    fire_times: &[String],
    sink: Arc<dyn NotificationSink>,
    now: DateTime<Local>,
) -> Result<Scheduler> {
    let fire_times = if fire_times.is_empty() {
        DEFAULT_FIRE_TIMES.to_vec()
    } else {
        fire_times.iter().map(String::as_str).collect()
    };

    let reminder = Reminder {
        title: REMINDER_TITLE.into(),
        message: REMINDER_MESSAGE.into(),
    };

    let mut scheduler = Scheduler::new();
    for at in fire_times {
        let sink = sink.clone();
        let reminder = reminder.clone();
        scheduler.every_day_at(at, now, move || send_reminder(sink.as_ref(), &reminder))?;
    }
    Ok(scheduler)
}

/// Failures are only logged. The loop keeps going regardless of whether the notification was
/// shown.
fn send_reminder(sink: &dyn NotificationSink, reminder: &Reminder) {
    match sink.notify(reminder) {
        Ok(()) => info!("Sent reminder {:?}", reminder.title),
        Err(e) => warn!("Failed to send reminder {e:?}"),
    }
}

/// Executes the polling loop. Deadlines advance by [POLL_INTERVAL] from the previous deadline,
/// so time spent running jobs doesn't accumulate into drift.
pub async fn run_reminder_loop(mut scheduler: Scheduler, clock: &impl Clock) -> Result<()> {
    let mut poll_point = clock.instant();
    loop {
        poll_point += POLL_INTERVAL;

        let fired = scheduler.run_pending(clock.now());
        if fired > 0 {
            debug!(
                "Ran {fired} reminder jobs, next run at {:?}",
                scheduler.next_run()
            );
        }

        clock.sleep_until(poll_point).await;
    }
}
