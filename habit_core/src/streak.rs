//! Streak computation over a completion-date set.
//!
//! The current streak is the run of consecutive calendar days ending at
//! today or yesterday. A habit not yet completed today keeps its streak
//! alive until a full day passes with no completion; a gap of two or more
//! days breaks it.

use crate::dates::parse_date;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Compute the current streak for a completion history.
///
/// The input is treated as a set: duplicate dates count once, and order
/// does not matter. Entries that do not parse as canonical `YYYY-MM-DD`
/// dates are ignored; the engine is total over any input, and rejecting
/// malformed documents is the import validator's job.
///
/// The most recent completion anchors the streak only if it falls on
/// `today` or the day before; each earlier completion extends the streak
/// only if it falls exactly one day before the current anchor.
pub fn calculate_streak(completed_dates: &[String], today: NaiveDate) -> u32 {
    // BTreeSet both dedupes and orders the history
    let dates: BTreeSet<NaiveDate> = completed_dates
        .iter()
        .filter_map(|value| parse_date(value))
        .collect();

    let mut newest_first = dates.iter().rev();
    let Some(&most_recent) = newest_first.next() else {
        return 0;
    };

    if most_recent != today && Some(most_recent) != today.pred_opt() {
        return 0;
    }

    let mut streak = 1;
    let mut anchor = most_recent;
    for &date in newest_first {
        match anchor.pred_opt() {
            Some(expected) if date == expected => {
                streak += 1;
                anchor = date;
            }
            _ => break,
        }
    }

    streak
}

/// Length of the longest consecutive run anywhere in a completion history.
///
/// Unlike [`calculate_streak`] this does not depend on today: a run broken
/// long ago still counts. Duplicates and unparseable entries are treated
/// as in [`calculate_streak`].
pub fn longest_run(completed_dates: &[String]) -> u32 {
    let dates: BTreeSet<NaiveDate> = completed_dates
        .iter()
        .filter_map(|value| parse_date(value))
        .collect();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &date in &dates {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}
