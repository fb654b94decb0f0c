use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::mood::{Mood, MoodEntry};

/// Mean intensity of all entries recorded on a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyIntensity {
    pub date: NaiveDate,
    pub mean: f64,
    pub entries: u32,
}

/// Sum of intensities recorded for a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodWeight {
    pub mood: Mood,
    pub weight: u32,
}

/// Returns one value per day that has entries, ordered by date. Days without entries are
/// skipped rather than reported as zero.
pub fn daily_mean_intensity<'a>(
    entries: impl IntoIterator<Item = &'a MoodEntry>,
) -> Vec<DailyIntensity> {
    let mut days = BTreeMap::<NaiveDate, (u32, u32)>::new();
    for entry in entries {
        let (sum, count) = days.entry(entry.date()).or_default();
        *sum += u32::from(entry.intensity().get());
        *count += 1;
    }

    days.into_iter()
        .map(|(date, (sum, count))| DailyIntensity {
            date,
            mean: f64::from(sum) / f64::from(count),
            entries: count,
        })
        .collect()
}

/// Distribution of moods weighted by intensity. A mood logged once at 5 outweighs a mood logged
/// twice at 2. Moods are returned ordered by their label.
pub fn weighted_distribution<'a>(
    entries: impl IntoIterator<Item = &'a MoodEntry>,
) -> Vec<MoodWeight> {
    let mut moods = BTreeMap::<&'static str, MoodWeight>::new();
    for entry in entries {
        let mood = entry.mood();
        moods
            .entry(mood.label())
            .or_insert(MoodWeight { mood, weight: 0 })
            .weight += u32::from(entry.intensity().get());
    }

    moods.into_values().collect()
}

/// The mood with the highest weight. On a tie the label that sorts first wins.
pub fn dominant_mood(distribution: &[MoodWeight]) -> Option<Mood> {
    distribution
        .iter()
        .copied()
        .reduce(|best, next| {
            let ties_before = next.weight == best.weight && next.mood.label() < best.mood.label();
            if next.weight > best.weight || ties_before {
                next
            } else {
                best
            }
        })
        .map(|v| v.mood)
}
