use anyhow::{anyhow, Result};
use rand::{seq::SliceRandom, Rng};
use tracing::info;

use crate::{
    insights::{
        chart::{Chart, ChartKind, CORNFLOWER_BLUE, LIGHT_SALMON, SOFT_PALETTE},
        weekly_insights, WeeklyOutcome, WeeklyReport,
    },
    mood::{collector::EntryCollector, store::EntryLog, Intensity, Mood},
    utils::{clock::Clock, time::date_label},
};

use super::{
    presenter::{InputClosed, Presenter},
    quotes::{daily_quote, weekly_motivation},
};

pub const PAGE_TITLE: &str = "🌈 Moodly - Your Mood Tracker";
pub const VIEWS: [&str; 2] = ["Track My Mood", "Weekly Insights"];

/// Interactive session. Each menu choice renders its view from scratch, entries live only as
/// long as the session does.
pub struct Session<P, L: EntryLog, R> {
    presenter: P,
    collector: EntryCollector<L>,
    clock: Box<dyn Clock>,
    rng: R,
}

impl<P: Presenter, L: EntryLog, R: Rng> Session<P, L, R> {
    pub fn new(presenter: P, collector: EntryCollector<L>, clock: Box<dyn Clock>, rng: R) -> Self {
        Self {
            presenter,
            collector,
            clock,
            rng,
        }
    }

    /// Runs until the user quits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        self.presenter.title(PAGE_TITLE)?;
        loop {
            let Some(view) = self.presenter.menu("Menu", &VIEWS)? else {
                break;
            };

            let result = match view {
                0 => self.track_mood(),
                _ => self.show_weekly_insights(),
            };

            match result {
                Ok(()) => (),
                Err(e) if e.is::<InputClosed>() => break,
                Err(e) => return Err(e),
            }
        }
        info!(
            "Session finished with {} entries",
            self.collector.log().snapshot().len()
        );
        Ok(())
    }

    pub fn into_parts(self) -> (P, EntryCollector<L>) {
        (self.presenter, self.collector)
    }

    fn track_mood(&mut self) -> Result<()> {
        self.presenter.subheader("✨ How are you feeling today?")?;

        let index = self.presenter.select("Select your mood:", &Mood::labels())?;
        let mood = Mood::ALL
            .get(index)
            .copied()
            .ok_or_else(|| anyhow!("Mood selection returned unknown index {index}"))?;

        let value = self.presenter.slider(
            "How strongly do you feel this mood? (1-5)",
            Intensity::MIN,
            Intensity::MAX,
            Intensity::DEFAULT,
        )?;
        let intensity = Intensity::new_opt(value)
            .ok_or_else(|| anyhow!("Slider returned {value} outside of intensity range"))?;

        let reason = self
            .presenter
            .text_area("Would you like to share why you feel this way? (optional)")?;

        if !self.presenter.button("Save")? {
            return Ok(());
        }

        let entry = self
            .collector
            .record(mood, intensity, &reason, self.clock.now());
        info!("Recorded {} ({})", entry.mood(), entry.intensity());

        self.presenter.success(&format!(
            "Your mood has been recorded: {} ({})",
            entry.mood(),
            entry.intensity()
        ))?;
        self.presenter.info(daily_quote(entry.hour(), &mut self.rng))
    }

    fn show_weekly_insights(&mut self) -> Result<()> {
        self.presenter.subheader("📊 Weekly Mood Analysis")?;

        let now = self.clock.now();
        let presenter = &mut self.presenter;
        match weekly_insights(self.collector.log().snapshot(), now) {
            WeeklyOutcome::NoData => presenter.warning("No mood data recorded yet."),
            WeeklyOutcome::NoRecentData => presenter.info("No entries found for the past week."),
            WeeklyOutcome::Report(report) => show_report(presenter, &mut self.rng, &report),
        }
    }
}

fn show_report(
    presenter: &mut impl Presenter,
    rng: &mut impl Rng,
    report: &WeeklyReport,
) -> Result<()> {
    let daily = report
        .daily_intensity
        .iter()
        .map(|v| (date_label(v.date), v.mean))
        .collect::<Vec<_>>();

    presenter.write("📈 Daily Mood Intensity Over the Week (Line Chart)")?;
    presenter.chart(
        &Chart::new(ChartKind::Line, "Mood Intensity Trend", daily.clone())
            .with_colour(CORNFLOWER_BLUE)
            .with_y_label("Average Intensity"),
    )?;

    presenter.write("📊 Daily Mood Intensity Over the Week (Bar Chart)")?;
    presenter.chart(
        &Chart::new(ChartKind::Bar, "Daily Mood Intensity (Bar Chart)", daily)
            .with_colour(LIGHT_SALMON)
            .with_x_label("Date")
            .with_y_label("Average Intensity"),
    )?;

    let distribution = report
        .distribution
        .iter()
        .map(|v| (v.mood.to_string(), f64::from(v.weight)))
        .collect::<Vec<_>>();
    let colours = SOFT_PALETTE
        .choose_multiple(rng, distribution.len())
        .copied()
        .collect();

    presenter.write("🧠 Mood Distribution (Weighted by Intensity)")?;
    presenter.chart(
        &Chart::new(ChartKind::Pie, "Mood Distribution", distribution).with_colours(colours),
    )?;

    presenter.success(&format!(
        "Your most intense mood this week was: {}",
        report.dominant
    ))?;

    presenter.divider()?;
    presenter.info("💬 Weekly Motivation")?;
    presenter.write(weekly_motivation(rng))?;

    let notes = report
        .notes
        .iter()
        .map(|v| {
            format!(
                "{} - {} ({})\n{}",
                date_label(v.date()),
                v.mood(),
                v.intensity(),
                v.reason()
            )
        })
        .collect::<Vec<_>>();
    presenter.expander("📖 See your notes from this week", &notes)
}

#[cfg(test)]
mod session_tests {
    use std::io::Cursor;

    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};
    use rand::{rngs::StdRng, SeedableRng};
    use tokio::time::Instant;

    use crate::{
        cli::{
            presenter::TerminalPresenter,
            quotes::{EVENING_QUOTES, MORNING_QUOTES},
        },
        mood::{
            collector::EntryCollector,
            store::{EntryLog, MoodLog},
            Intensity, Mood, MoodEntry,
        },
        utils::{clock::Clock, logging::TEST_LOGGING},
    };

    use super::Session;

    struct FixedClock(DateTime<Local>);

    #[async_trait]
    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }

        fn instant(&self) -> Instant {
            Instant::now()
        }

        async fn sleep_until(&self, instant: Instant) {
            tokio::time::sleep_until(instant).await;
        }
    }

    fn at(hour: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 4, 12)
                    .unwrap()
                    .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap()),
            )
            .unwrap()
    }

    fn run_session(input: &str, log: MoodLog, now: DateTime<Local>) -> Result<(String, MoodLog)> {
        *TEST_LOGGING;
        let presenter =
            TerminalPresenter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false);
        let mut session = Session::new(
            presenter,
            EntryCollector::new(log),
            Box::new(FixedClock(now)),
            StdRng::seed_from_u64(42),
        );
        session.run()?;
        let (presenter, collector) = session.into_parts();
        let output = String::from_utf8(presenter.into_output())?;
        let log = collector.log().snapshot().iter().cloned().collect();
        Ok((output, log))
    }

    #[test]
    fn tracking_records_entries_in_order() -> Result<()> {
        let input = "1\n1\n5\nsunny walk\n\n\
                     1\nsad\n3\n\n\n\
                     1\n1\n1\n\n\n\
                     q\n";

        let (output, log) = run_session(input, MoodLog::new(), at(9))?;
        let entries = log.snapshot();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].mood(), Mood::Happy);
        assert_eq!(entries[0].mood_code(), 1);
        assert_eq!(entries[0].reason(), "sunny walk");
        assert_eq!(entries[1].mood(), Mood::Sad);
        assert_eq!(entries[1].mood_code(), 2);
        assert_eq!(entries[1].intensity().get(), 3);
        assert_eq!(entries[2].intensity().get(), 1);

        assert!(output.contains("Your mood has been recorded: Happy (5/5)"));
        assert!(output.contains("Your mood has been recorded: Sad (3/5)"));
        assert!(MORNING_QUOTES.iter().any(|v| output.contains(v)));
        assert!(!EVENING_QUOTES.iter().any(|v| output.contains(v)));
        Ok(())
    }

    #[test]
    fn evening_entries_get_evening_quotes() -> Result<()> {
        let (output, _) = run_session("1\n2\n\n\n\nq\n", MoodLog::new(), at(20))?;

        assert!(EVENING_QUOTES.iter().any(|v| output.contains(v)));
        assert!(!MORNING_QUOTES.iter().any(|v| output.contains(v)));
        Ok(())
    }

    #[test]
    fn weekly_insights_summarise_session() -> Result<()> {
        let input = "1\n1\n5\nsunny walk\n\n\
                     1\n2\n3\n\n\n\
                     1\n1\n1\nlong meeting\n\n\
                     2\nq\n";

        let (output, _) = run_session(input, MoodLog::new(), at(18))?;

        assert!(output.contains("Mood Intensity Trend"));
        assert!(output.contains("Daily Mood Intensity (Bar Chart)"));
        assert!(output.contains("Happy"));
        assert!(output.contains("66.7%"));
        assert!(output.contains("33.3%"));
        assert!(output.contains("Your most intense mood this week was: Happy"));
        assert!(output.contains("2024-04-12 - Happy (5/5)"));
        assert!(output.contains("    sunny walk"));
        assert!(output.contains("2024-04-12 - Happy (1/5)"));
        assert!(!output.contains("2024-04-12 - Sad (3/5)"));
        Ok(())
    }

    #[test]
    fn empty_and_stale_logs_show_different_messages() -> Result<()> {
        let (output, _) = run_session("2\nq\n", MoodLog::new(), at(12))?;
        assert!(output.contains("No mood data recorded yet."));
        assert!(!output.contains("No entries found for the past week."));

        let stale = MoodLog::from_iter([MoodEntry::new(
            Mood::Bored,
            Intensity::new_opt(2).unwrap(),
            "",
            at(12) - Duration::days(8),
        )]);
        let (output, _) = run_session("2\nq\n", stale, at(12))?;
        assert!(output.contains("No entries found for the past week."));
        assert!(!output.contains("No mood data recorded yet."));
        Ok(())
    }

    #[test]
    fn discarded_entry_is_not_recorded() -> Result<()> {
        let (output, log) = run_session("1\n3\n4\nnot now\nn\nq\n", MoodLog::new(), at(12))?;

        assert!(log.snapshot().is_empty());
        assert!(!output.contains("Your mood has been recorded"));
        Ok(())
    }

    #[test]
    fn closed_input_ends_session() -> Result<()> {
        let (_, log) = run_session("1\n1\n", MoodLog::new(), at(12))?;

        assert!(log.snapshot().is_empty());
        Ok(())
    }
}
