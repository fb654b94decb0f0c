use rand::{seq::SliceRandom, Rng};

pub const MORNING_QUOTES: [&str; 3] = [
    "When you wake up, remember what a great privilege it is to live, to enjoy, to think, and to love. – Marcus Aurelius",
    "Each morning we are born again. What we do today is what matters most. – Buddha",
    "Rise up, start fresh, see the bright opportunity in each new day.",
];

pub const EVENING_QUOTES: [&str; 3] = [
    "Be thankful for what you have today, and start fighting for what you will have tomorrow. – William Shakespeare",
    "Reflect on what you did today. Learn and grow. Tomorrow is a new beginning.",
    "Rest now, for tomorrow’s strength grows from today’s recovery.",
];

pub const WEEKLY_MOTIVATIONS: [&str; 4] = [
    "Consistency is the key to emotional balance.",
    "Your emotions are valid — track them, learn from them.",
    "Small steps lead to big emotional insights.",
    "Great job tracking your mood this week — keep it going!",
];

/// Morning lasts from 5 until noon.
pub fn is_morning(hour: u32) -> bool {
    (5..12).contains(&hour)
}

pub fn daily_quote(hour: u32, rng: &mut impl Rng) -> &'static str {
    let quotes: &[&'static str] = if is_morning(hour) {
        &MORNING_QUOTES
    } else {
        &EVENING_QUOTES
    };
    quotes.choose(rng).copied().unwrap_or_default()
}

pub fn weekly_motivation(rng: &mut impl Rng) -> &'static str {
    WEEKLY_MOTIVATIONS.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod quotes_tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{daily_quote, is_morning, EVENING_QUOTES, MORNING_QUOTES};

    #[test]
    fn morning_boundaries() {
        assert!(!is_morning(4));
        assert!(is_morning(5));
        assert!(is_morning(11));
        assert!(!is_morning(12));
        assert!(!is_morning(23));
    }

    #[test]
    fn quote_matches_time_of_day() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert!(MORNING_QUOTES.contains(&daily_quote(8, &mut rng)));
            assert!(EVENING_QUOTES.contains(&daily_quote(20, &mut rng)));
            assert!(EVENING_QUOTES.contains(&daily_quote(2, &mut rng)));
        }
    }
}
