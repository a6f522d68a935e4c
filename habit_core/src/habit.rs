//! The habit entity and its completion-toggle transitions.
//!
//! A habit owns its completion history (`completed_dates`) plus two
//! derived fields: `current_streak`, recomputed on every history
//! mutation, and `longest_streak`, the monotone historical maximum of
//! the current streak. Serialized field names follow the persisted JSON
//! shape (`createdAt`, `completedDates`, ...).

use crate::dates::format_date;
use crate::streak::calculate_streak;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A tracked recurring activity with a completion history
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub completed_dates: Vec<String>,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl Habit {
    /// Create a habit with a fresh id, an empty history, and streaks at 0
    ///
    /// The name is trimmed and must not be empty afterwards. `created_at`
    /// is fixed to the given day and never changes.
    pub fn new(name: &str, today: NaiveDate) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("habit name must not be empty".into()));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: format_date(today),
            completed_dates: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
        })
    }

    /// Change the display name; has no effect on the completion history
    pub fn rename(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("habit name must not be empty".into()));
        }
        self.name = name.to_string();
        Ok(())
    }

    /// Whether the history contains the given canonical date string
    pub fn is_completed_on(&self, date: &str) -> bool {
        self.completed_dates.iter().any(|d| d == date)
    }

    /// Whether the habit has been marked complete on the given day
    pub fn completed_today(&self, today: NaiveDate) -> bool {
        self.is_completed_on(&format_date(today))
    }

    /// Toggle completion for the given day and recompute derived fields.
    ///
    /// Removes today from the history if present, otherwise adds it, then
    /// recomputes `current_streak`. `longest_streak` only ever ratchets
    /// upward, so un-completing today can lower the current streak but
    /// never the longest. Identity fields (`id`, `name`, `created_at`)
    /// are carried over untouched.
    pub fn toggle_today(&self, today: NaiveDate) -> Habit {
        let today_str = format_date(today);

        let mut completed_dates = self.completed_dates.clone();
        if completed_dates.iter().any(|d| *d == today_str) {
            completed_dates.retain(|d| *d != today_str);
        } else {
            completed_dates.push(today_str);
        }

        // The stored sequence is logically a set; every mutation dedupes
        let mut seen = HashSet::new();
        completed_dates.retain(|d| seen.insert(d.clone()));

        let current_streak = calculate_streak(&completed_dates, today);

        Habit {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at.clone(),
            completed_dates,
            current_streak,
            longest_streak: self.longest_streak.max(current_streak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    fn history(dates: &[&str]) -> Vec<String> {
        dates.iter().map(|d| d.to_string()).collect()
    }

    fn habit_with_history(dates: &[&str]) -> Habit {
        let mut habit = Habit::new("Read", today()).unwrap();
        habit.completed_dates = history(dates);
        habit.current_streak = calculate_streak(&habit.completed_dates, today());
        habit.longest_streak = habit.current_streak;
        habit
    }

    #[test]
    fn test_new_habit_starts_empty() {
        let habit = Habit::new("Meditate", today()).unwrap();
        assert!(!habit.id.is_empty());
        assert_eq!(habit.name, "Meditate");
        assert_eq!(habit.created_at, "2025-07-15");
        assert!(habit.completed_dates.is_empty());
        assert_eq!(habit.current_streak, 0);
        assert_eq!(habit.longest_streak, 0);
    }

    #[test]
    fn test_new_habit_trims_name() {
        let habit = Habit::new("  Stretch  ", today()).unwrap();
        assert_eq!(habit.name, "Stretch");
    }

    #[test]
    fn test_new_habit_rejects_blank_name() {
        assert!(Habit::new("", today()).is_err());
        assert!(Habit::new("   ", today()).is_err());
    }

    #[test]
    fn test_new_habits_get_distinct_ids() {
        let a = Habit::new("A", today()).unwrap();
        let b = Habit::new("B", today()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rename_keeps_history() {
        let mut habit = habit_with_history(&["2025-07-14", "2025-07-15"]);
        habit.rename("  Read more  ").unwrap();
        assert_eq!(habit.name, "Read more");
        assert_eq!(habit.completed_dates.len(), 2);
        assert_eq!(habit.current_streak, 2);
        assert!(habit.rename(" ").is_err());
    }

    #[test]
    fn test_toggle_adds_today() {
        let habit = Habit::new("Run", today()).unwrap();
        let toggled = habit.toggle_today(today());

        assert!(toggled.completed_today(today()));
        assert_eq!(toggled.current_streak, 1);
        assert_eq!(toggled.longest_streak, 1);
    }

    #[test]
    fn test_toggle_removes_today() {
        let habit = habit_with_history(&["2025-07-15"]);
        let toggled = habit.toggle_today(today());

        assert!(!toggled.completed_today(today()));
        assert_eq!(toggled.current_streak, 0);
    }

    #[test]
    fn test_toggle_preserves_identity_fields() {
        let habit = Habit::new("Write", today()).unwrap();
        let toggled = habit.toggle_today(today());

        assert_eq!(toggled.id, habit.id);
        assert_eq!(toggled.name, habit.name);
        assert_eq!(toggled.created_at, habit.created_at);
    }

    #[test]
    fn test_double_toggle_restores_history_and_current_streak() {
        let habit = habit_with_history(&["2025-07-13", "2025-07-14"]);
        let twice = habit.toggle_today(today()).toggle_today(today());

        assert_eq!(twice.completed_dates, habit.completed_dates);
        assert_eq!(twice.current_streak, habit.current_streak);
    }

    #[test]
    fn test_longest_streak_never_decreases() {
        // Three consecutive days ending today, then today is un-completed
        let habit = habit_with_history(&["2025-07-13", "2025-07-14", "2025-07-15"]);
        assert_eq!(habit.current_streak, 3);
        assert_eq!(habit.longest_streak, 3);

        let untoggled = habit.toggle_today(today());
        assert_eq!(untoggled.current_streak, 2);
        assert_eq!(untoggled.longest_streak, 3);
    }

    #[test]
    fn test_toggle_dedupes_existing_duplicates() {
        let habit = habit_with_history(&["2025-07-14", "2025-07-14", "2025-07-13"]);
        let toggled = habit.toggle_today(today());

        assert_eq!(
            toggled.completed_dates,
            history(&["2025-07-14", "2025-07-13", "2025-07-15"])
        );
        assert_eq!(toggled.current_streak, 3);
    }

    #[test]
    fn test_serialized_field_names_match_wire_shape() {
        let habit = Habit::new("Sleep early", today()).unwrap();
        let json = serde_json::to_value(&habit).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("completedDates").is_some());
        assert!(json.get("currentStreak").is_some());
        assert!(json.get("longestStreak").is_some());
    }
}
