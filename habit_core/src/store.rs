//! Habit list persistence with file locking.
//!
//! The whole collection lives in one JSON file, the habit array under a
//! single `habits` key. Reads take a shared lock; writes go to a temp
//! file in the same directory and atomically replace the original, so a
//! crash mid-save never leaves a half-written store. The in-memory list
//! is the owner; this file is the mirror updated after every mutation.

use crate::habit::Habit;
use crate::{Error, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk shape of the store file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    habits: Vec<Habit>,
}

/// File-backed store for the habit collection
pub struct HabitStore {
    path: PathBuf,
}

impl HabitStore {
    /// Create a store handle for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the habit list with shared locking
    ///
    /// A missing file is the empty list. An unreadable or corrupted file
    /// also yields the empty list, with a warning.
    pub fn load(&self) -> Result<Vec<Habit>> {
        if !self.path.exists() {
            tracing::info!("No habit store at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open habit store {:?}: {}. Starting empty.",
                    self.path,
                    e
                );
                return Ok(Vec::new());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock habit store {:?}: {}. Starting empty.",
                self.path,
                e
            );
            return Ok(Vec::new());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read habit store {:?}: {}. Starting empty.",
                self.path,
                e
            );
            return Ok(Vec::new());
        }

        file.unlock()?;

        match serde_json::from_str::<StoreFile>(&contents) {
            Ok(store) => {
                tracing::debug!("Loaded {} habits from {:?}", store.habits.len(), self.path);
                Ok(store.habits)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse habit store {:?}: {}. Starting empty.",
                    self.path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Save the habit list with exclusive locking
    ///
    /// Atomically replaces the store file:
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    pub fn save(&self, habits: &[Habit]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(&StoreFile {
                habits: habits.to_vec(),
            })?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} habits to {:?}", habits.len(), self.path);
        Ok(())
    }

    /// Load the list, modify it, and save it back
    pub fn update<F>(&self, f: F) -> Result<Vec<Habit>>
    where
        F: FnOnce(&mut Vec<Habit>) -> Result<()>,
    {
        let mut habits = self.load()?;
        f(&mut habits)?;
        self.save(&habits)?;
        Ok(habits)
    }

    /// Append a newly created habit
    pub fn add(&self, habit: Habit) -> Result<()> {
        self.update(|habits| {
            habits.push(habit);
            Ok(())
        })?;
        Ok(())
    }

    /// Replace the stored habit with the same id
    pub fn update_habit(&self, updated: &Habit) -> Result<()> {
        self.update(|habits| {
            match habits.iter_mut().find(|h| h.id == updated.id) {
                Some(existing) => *existing = updated.clone(),
                None => tracing::warn!("No habit with id {} to update", updated.id),
            }
            Ok(())
        })?;
        Ok(())
    }

    /// Delete a habit by id
    pub fn remove(&self, id: &str) -> Result<()> {
        self.update(|habits| {
            habits.retain(|h| h.id != id);
            Ok(())
        })?;
        Ok(())
    }

    /// Full data reset: save the empty list
    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }

    /// Toggle today's completion for one habit and persist the result
    ///
    /// Returns the updated habit. An unknown id leaves the store
    /// untouched.
    pub fn toggle_today(&self, id: &str, today: NaiveDate) -> Result<Habit> {
        let mut toggled = None;
        self.update(|habits| {
            let habit = habits
                .iter_mut()
                .find(|h| h.id == id)
                .ok_or_else(|| Error::Store(format!("no habit with id {}", id)))?;
            let updated = habit.toggle_today(today);
            *habit = updated.clone();
            toggled = Some(updated);
            Ok(())
        })?;

        toggled.ok_or_else(|| Error::Store(format!("no habit with id {}", id)))
    }
}
