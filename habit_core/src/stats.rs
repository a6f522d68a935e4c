//! Aggregate statistics over the habit collection.
//!
//! Pure reads used by summary surfaces (headers, stats screens) and by
//! the export document totals.

use crate::habit::Habit;
use chrono::NaiveDate;

/// Sum of current streaks across all habits
pub fn total_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.current_streak).sum()
}

/// Number of habits already marked complete on the given day
pub fn completed_today(habits: &[Habit], today: NaiveDate) -> usize {
    habits.iter().filter(|h| h.completed_today(today)).count()
}

/// The longest streak ever recorded across all habits
pub fn longest_streak(habits: &[Habit]) -> u32 {
    habits.iter().map(|h| h.longest_streak).max().unwrap_or(0)
}

/// Badge for a streak length
pub fn streak_emoji(streak: u32) -> &'static str {
    if streak == 0 {
        return "😴";
    }
    match streak {
        1..=2 => "🔥",
        3..=6 => "🔥🔥",
        7..=13 => "🔥🔥🔥",
        14..=29 => "🔥🔥🔥🔥",
        30..=99 => "🔥🔥🔥🔥🔥",
        _ => "👑",
    }
}
