//! Weekly aggregation of the session log. Everything here is computed from a snapshot of the log
//! and a reference time, nothing is cached between views.

pub mod analysis;
pub mod chart;

use analysis::{
    daily_mean_intensity, dominant_mood, weighted_distribution, DailyIntensity, MoodWeight,
};
use chrono::{DateTime, Duration, Local};
use tracing::{debug, instrument};

use crate::mood::{Mood, MoodEntry};

pub const WINDOW_DAYS: i64 = 7;

/// Entries whose timestamp lies in `[end - 7 days, end]`. Comparison is done on exact
/// timestamps, not on calendar days.
#[derive(Debug)]
pub struct WeeklyWindow<'a> {
    start: DateTime<Local>,
    end: DateTime<Local>,
    entries: Vec<&'a MoodEntry>,
}

impl<'a> WeeklyWindow<'a> {
    pub fn select(entries: &'a [MoodEntry], now: DateTime<Local>) -> Self {
        let start = now - Duration::days(WINDOW_DAYS);
        let entries = entries
            .iter()
            .filter(|v| v.timestamp() >= start && v.timestamp() <= now)
            .collect();
        Self {
            start,
            end: now,
            entries,
        }
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    pub fn entries(&self) -> &[&'a MoodEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
pub struct WeeklyReport<'a> {
    pub daily_intensity: Vec<DailyIntensity>,
    pub distribution: Vec<MoodWeight>,
    pub dominant: Mood,
    /// Entries of the window that carry a note, in the order they were recorded.
    pub notes: Vec<&'a MoodEntry>,
}

/// Result of looking at the last week. Missing data is an expected state and is reported as a
/// variant instead of an error.
#[derive(Debug)]
pub enum WeeklyOutcome<'a> {
    /// Nothing was recorded during the session.
    NoData,
    /// Entries exist, but none of them are from the last 7 days.
    NoRecentData,
    Report(WeeklyReport<'a>),
}

#[instrument(skip(entries))]
pub fn weekly_insights(entries: &[MoodEntry], now: DateTime<Local>) -> WeeklyOutcome<'_> {
    if entries.is_empty() {
        return WeeklyOutcome::NoData;
    }

    let window = WeeklyWindow::select(entries, now);
    debug!(
        "Selected {} of {} entries between {} and {}",
        window.entries().len(),
        entries.len(),
        window.start(),
        window.end()
    );

    let distribution = weighted_distribution(window.entries().iter().copied());
    let Some(dominant) = dominant_mood(&distribution) else {
        return WeeklyOutcome::NoRecentData;
    };

    WeeklyOutcome::Report(WeeklyReport {
        daily_intensity: daily_mean_intensity(window.entries().iter().copied()),
        distribution,
        dominant,
        notes: window
            .entries()
            .iter()
            .copied()
            .filter(|v| v.has_reason())
            .collect(),
    })
}

#[cfg(test)]
mod insights_tests {
    use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

    use crate::{
        mood::{Intensity, Mood, MoodEntry},
        utils::logging::TEST_LOGGING,
    };

    use super::{weekly_insights, WeeklyOutcome, WeeklyWindow};

    fn test_now() -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 4, 12)
                    .unwrap()
                    .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            )
            .unwrap()
    }

    fn entry(mood: Mood, intensity: u8, reason: &str, at: DateTime<Local>) -> MoodEntry {
        MoodEntry::new(mood, Intensity::new_opt(intensity).unwrap(), reason, at)
    }

    #[test]
    fn window_lower_bound_is_inclusive() {
        let now = test_now();
        let entries = [
            entry(Mood::Sad, 2, "", now - Duration::days(7) - Duration::seconds(1)),
            entry(Mood::Happy, 4, "", now - Duration::days(7)),
            entry(Mood::Bored, 3, "", now),
        ];

        let window = WeeklyWindow::select(&entries, now);

        assert_eq!(window.entries().len(), 2);
        assert_eq!(window.entries()[0].mood(), Mood::Happy);
        assert_eq!(window.entries()[1].mood(), Mood::Bored);
    }

    #[test]
    fn window_excludes_future_entries() {
        let now = test_now();
        let entries = [entry(Mood::Sad, 2, "", now + Duration::seconds(1))];

        assert!(WeeklyWindow::select(&entries, now).is_empty());
    }

    #[test]
    fn empty_log_and_stale_log_differ() {
        *TEST_LOGGING;
        let now = test_now();

        assert!(matches!(weekly_insights(&[], now), WeeklyOutcome::NoData));

        let stale = [entry(Mood::Happy, 5, "", now - Duration::days(10))];
        assert!(matches!(
            weekly_insights(&stale, now),
            WeeklyOutcome::NoRecentData
        ));
    }

    #[test]
    fn report_uses_only_window_entries() {
        *TEST_LOGGING;
        let now = test_now();
        let entries = [
            entry(Mood::Angry, 5, "old", now - Duration::days(9)),
            entry(Mood::Happy, 5, "", now - Duration::days(1)),
            entry(Mood::Sad, 3, "rainy", now - Duration::days(1) + Duration::hours(1)),
            entry(Mood::Happy, 1, "long meeting", now),
        ];

        let WeeklyOutcome::Report(report) = weekly_insights(&entries, now) else {
            panic!("Expected a report");
        };

        assert_eq!(report.dominant, Mood::Happy);
        assert_eq!(report.distribution.len(), 2);
        assert_eq!(report.distribution[0].weight, 6);
        assert_eq!(report.distribution[1].weight, 3);

        assert_eq!(report.daily_intensity.len(), 2);
        assert_eq!(report.daily_intensity[0].mean, 4.);
        assert_eq!(report.daily_intensity[1].mean, 1.);

        let notes = report.notes.iter().map(|v| v.reason()).collect::<Vec<_>>();
        assert_eq!(notes, vec!["rainy", "long meeting"]);
    }
}
