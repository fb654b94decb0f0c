use super::MoodEntry;

/// Interface for abstracting the session log of entries. Implementations only ever grow:
/// entries are appended in arrival order and never changed or removed.
pub trait EntryLog {
    fn append(&mut self, entry: MoodEntry);

    /// Read-only view of every entry recorded so far, oldest first.
    fn snapshot(&self) -> &[MoodEntry];
}

/// Process-lifetime log. Nothing is written to disk, entries are lost when the session ends.
#[derive(Debug, Default)]
pub struct MoodLog {
    entries: Vec<MoodEntry>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryLog for MoodLog {
    fn append(&mut self, entry: MoodEntry) {
        self.entries.push(entry);
    }

    fn snapshot(&self) -> &[MoodEntry] {
        &self.entries
    }
}

impl FromIterator<MoodEntry> for MoodLog {
    fn from_iter<T: IntoIterator<Item = MoodEntry>>(iter: T) -> Self {
        let mut log = MoodLog::new();
        for entry in iter {
            log.append(entry);
        }
        log
    }
}
