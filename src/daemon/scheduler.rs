use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use tracing::{debug, info};

/// Time of day a job should fire at. Accepts `HH:MM` and `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FireTime(NaiveTime);

impl FireTime {
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// First occurrence of this time of day strictly after `after`.
    pub fn next_after(&self, after: DateTime<Local>) -> DateTime<Local> {
        // A DST gap can skip the time on a given day, so a couple of days are checked.
        for offset in 0..=2 {
            let Some(date) = after.date_naive().checked_add_days(Days::new(offset)) else {
                continue;
            };
            if let Some(candidate) = Local.from_local_datetime(&date.and_time(self.0)).earliest() {
                if candidate > after {
                    return candidate;
                }
            }
        }
        after + chrono::Duration::days(1)
    }
}

impl Display for FireTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl FromStr for FireTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(FireTime)
            .map_err(|e| anyhow!("Can't parse {s} into a time of day, expected HH:MM: {e}"))
    }
}

pub type Job = Box<dyn FnMut() + Send>;

struct ScheduledJob {
    at: FireTime,
    next_run: DateTime<Local>,
    job: Job,
}

/// Minimal daily job scheduler. Jobs are registered for a time of day and are run by
/// [Scheduler::run_pending] once that time has passed.
#[derive(Default)]
pub struct Scheduler {
    jobs: Vec<ScheduledJob>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `job` to run every day at `at`. The first run is today if `at` is still ahead
    /// of `now`, otherwise tomorrow.
    pub fn every_day_at(
        &mut self,
        at: &str,
        now: DateTime<Local>,
        job: impl FnMut() + Send + 'static,
    ) -> anyhow::Result<DateTime<Local>> {
        let at = at.parse::<FireTime>()?;
        let next_run = at.next_after(now);
        info!("Registered daily job at {at}, first run at {next_run}");
        self.jobs.push(ScheduledJob {
            at,
            next_run,
            job: Box::new(job),
        });
        Ok(next_run)
    }

    /// Runs every job that is due at `now`, in registration order. Each job runs at most once
    /// per call even if several of its occurrences were missed. Returns amount of jobs run.
    pub fn run_pending(&mut self, now: DateTime<Local>) -> usize {
        let mut fired = 0;
        for scheduled in self.jobs.iter_mut().filter(|v| v.next_run <= now) {
            debug!("Running job scheduled for {}", scheduled.next_run);
            (scheduled.job)();
            scheduled.next_run = scheduled.at.next_after(now);
            fired += 1;
        }
        fired
    }

    /// The earliest upcoming run among all jobs.
    pub fn next_run(&self) -> Option<DateTime<Local>> {
        self.jobs.iter().map(|v| v.next_run).min()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
