#![forbid(unsafe_code)]

//! Core domain model and business logic for the Habit Streak system.
//!
//! This crate provides:
//! - Canonical date handling (local calendar days, `YYYY-MM-DD`)
//! - Streak computation over completion histories
//! - The habit entity and completion-toggle transitions
//! - Collection statistics
//! - Backup export/import with validation
//! - Persistence (habit store, config)

pub mod error;
pub mod config;
pub mod logging;
pub mod dates;
pub mod streak;
pub mod habit;
pub mod stats;
pub mod backup;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use config::Config;
pub use dates::{format_date, parse_date, today, today_string};
pub use streak::{calculate_streak, longest_run};
pub use habit::Habit;
pub use backup::{build_export, read_backup, validate_and_normalize, write_backup, ExportDocument};
pub use store::HabitStore;
