//! Core data of the tracker. A [MoodEntry] is created through
//! [collector::EntryCollector] and kept in an [store::EntryLog] for the lifetime of a session.

pub mod collector;
pub mod store;

use std::{fmt::Display, str::FromStr, sync::Arc};

use anyhow::anyhow;
use chrono::{DateTime, Local, NaiveDate, Timelike};

/// The fixed set of moods. Declaration order defines the mood code and the ordering used
/// everywhere moods are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Anxious,
    Energetic,
    Bored,
    Sleepy,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Anxious,
        Mood::Energetic,
        Mood::Bored,
        Mood::Sleepy,
        Mood::Tired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Anxious => "Anxious",
            Mood::Energetic => "Energetic",
            Mood::Bored => "Bored",
            Mood::Sleepy => "Sleepy",
            Mood::Tired => "Tired",
        }
    }

    /// 1-based position of the mood in [Mood::ALL].
    pub fn code(self) -> u8 {
        self as u8 + 1
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.label()).collect()
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Unknown mood {s}"))
    }
}

/// Strength of a mood, always within [Intensity::MIN]..=[Intensity::MAX].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: u8 = 3;

    pub fn new_opt(value: u8) -> Option<Intensity> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Intensity(value))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

impl FromStr for Intensity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim().parse::<u8>()?;
        Intensity::new_opt(v).ok_or_else(|| {
            anyhow!(
                "Intensity {v} is outside of {}..={}",
                Intensity::MIN,
                Intensity::MAX
            )
        })
    }
}

/// A single logged mood. Fields derived from the timestamp and the mood are computed once on
/// creation and can't be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    date: NaiveDate,
    timestamp: DateTime<Local>,
    hour: u32,
    mood: Mood,
    mood_code: u8,
    intensity: Intensity,
    reason: Arc<str>,
}

impl MoodEntry {
    pub fn new(
        mood: Mood,
        intensity: Intensity,
        reason: impl Into<Arc<str>>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            date: timestamp.date_naive(),
            hour: timestamp.hour(),
            timestamp,
            mood,
            mood_code: mood.code(),
            intensity,
            reason: reason.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn mood_code(&self) -> u8 {
        self.mood_code
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// Free text note. Empty when the user didn't leave one.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn has_reason(&self) -> bool {
        !self.reason.is_empty()
    }
}
