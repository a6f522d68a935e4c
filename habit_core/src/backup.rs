//! Backup export/import with validation.
//!
//! A backup is a single JSON document: the habit list plus metadata
//! (format version, export timestamp, totals). Export is a trivial
//! serialization; import goes through [`validate_and_normalize`], which
//! either yields a well-formed habit list or rejects the whole document.
//! Import is atomic by construction: validation finishes before the
//! caller replaces any stored state, so a rejected document changes
//! nothing.

use crate::dates::format_date;
use crate::habit::Habit;
use crate::stats;
use crate::streak::{calculate_streak, longest_run};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Format version written into every export document
pub const EXPORT_VERSION: &str = "1.0.0";

/// The complete backup document
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub habits: Vec<Habit>,
    pub total_habits: usize,
    pub total_streak: u32,
}

/// Assemble the export document for the current habit list
///
/// The timestamp is a parameter so callers (and tests) control the clock.
pub fn build_export(habits: &[Habit], exported_at: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        version: EXPORT_VERSION.to_string(),
        export_date: exported_at,
        habits: habits.to_vec(),
        total_habits: habits.len(),
        total_streak: stats::total_streak(habits),
    }
}

/// Default backup file name for a given day
pub fn backup_filename(date: NaiveDate) -> String {
    format!("habit-streak-backup-{}.json", format_date(date))
}

/// Validate an imported document and normalize it into habit entities.
///
/// The document must be a JSON object with a `habits` array; every
/// element must carry non-empty string `id`, `name`, and `createdAt`
/// fields. `completedDates` falls back to an empty list when absent or
/// not an array, and is deduplicated. Output order matches input order;
/// duplicate habit ids pass through untouched.
///
/// Streak fields are derived from the imported history, never trusted
/// from the file: `currentStreak` is recomputed against `today`, and
/// `longestStreak` is the maximum of the document's (normalized) value
/// and the longest run in the history.
pub fn validate_and_normalize(document: &Value, today: NaiveDate) -> Result<Vec<Habit>> {
    let root = match document.as_object() {
        Some(root) => root,
        None => {
            return Err(Error::Validation(
                "backup document is not a JSON object".into(),
            ))
        }
    };

    let entries = root
        .get("habits")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Validation("backup document has no `habits` array".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_habit(entry, index, today))
        .collect()
}

fn normalize_habit(entry: &Value, index: usize, today: NaiveDate) -> Result<Habit> {
    let id = required_string(entry, "id", index)?;
    let name = required_string(entry, "name", index)?;
    let created_at = required_string(entry, "createdAt", index)?;

    let mut completed_dates: Vec<String> = entry
        .get("completedDates")
        .and_then(Value::as_array)
        .map(|dates| {
            dates
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    // The stored sequence is logically a set; every mutation dedupes
    let mut seen = HashSet::new();
    completed_dates.retain(|d| seen.insert(d.clone()));

    let imported_longest = entry
        .get("longestStreak")
        .and_then(Value::as_u64)
        .map_or(0, |n| n as u32);

    let current_streak = calculate_streak(&completed_dates, today);
    let longest_streak = imported_longest.max(longest_run(&completed_dates));

    Ok(Habit {
        id,
        name,
        created_at,
        completed_dates,
        current_streak,
        longest_streak,
    })
}

fn required_string(entry: &Value, key: &str, index: usize) -> Result<String> {
    match entry.get(key).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::InvalidHabit {
            index,
            reason: format!("missing required field `{}`", key),
        }),
    }
}

/// Write a pretty-printed backup document, atomically
pub fn write_backup(path: &Path, habits: &[Habit], exported_at: DateTime<Utc>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "backup path missing parent")
    })?)?;

    let document = build_export(habits, exported_at);
    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string_pretty(&document)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!(
        "Wrote backup of {} habits to {:?}",
        document.total_habits,
        path
    );
    Ok(())
}

/// Read, parse, and validate a backup file
pub fn read_backup(path: &Path, today: NaiveDate) -> Result<Vec<Habit>> {
    let contents = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;
    let habits = validate_and_normalize(&document, today)?;

    tracing::info!("Read {} habits from backup {:?}", habits.len(), path);
    Ok(habits)
}
