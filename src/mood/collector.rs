use chrono::{DateTime, Local};
use tracing::debug;

use super::{store::EntryLog, Intensity, Mood, MoodEntry};

/// Bridges user input and the [EntryLog]. Every recorded entry gets its derived fields from the
/// moment it was recorded.
pub struct EntryCollector<L: EntryLog> {
    log: L,
}

impl<L: EntryLog> EntryCollector<L> {
    pub fn new(log: L) -> Self {
        Self { log }
    }

    pub fn record(
        &mut self,
        mood: Mood,
        intensity: Intensity,
        reason: &str,
        now: DateTime<Local>,
    ) -> MoodEntry {
        let entry = MoodEntry::new(mood, intensity, reason, now);
        debug!("Recording entry {:?}", entry);
        self.log.append(entry.clone());
        entry
    }

    pub fn log(&self) -> &L {
        &self.log
    }
}
