
use chrono::NaiveDate;


/// This is the standard way of converting a date to a string in moodly.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
