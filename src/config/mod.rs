//! Configuration management for the daybook library.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults. The only setting is the
//! journal directory, which holds the entry archive and the persisted search
//! index side by side.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_DIR`: Path to the journal directory (defaults to ~/Documents/daybook)
//! - `HOME`: Used for expanding the default journal directory path

use crate::constants::{
    DEFAULT_JOURNAL_SUBDIR, ENTRIES_SUBDIR, ENV_VAR_DAYBOOK_DIR, ENV_VAR_HOME, INDEX_FILE_NAME,
    PROMPTS_FILE_NAME,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;

/// Configuration for the daybook library.
///
/// This struct holds the journal directory under which all journal data
/// lives: the `entries/` sub-directory with one file per entry, and the
/// `index.json` search index next to it.
///
/// # Examples
///
/// Creating a configuration manually (the usual approach in tests):
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     journal_dir: PathBuf::from("/path/to/journal"),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Directory where all journal data is stored.
    ///
    /// This is loaded from the DAYBOOK_DIR environment variable with a
    /// fallback to ~/Documents/daybook if not specified.
    pub journal_dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Reads `DAYBOOK_DIR` and falls back to `~/Documents/daybook`. The path
    /// is expanded with `shellexpand` so `~` and environment variable
    /// references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The journal directory path expansion fails
    /// - The resulting path is empty
    pub fn load() -> AppResult<Self> {
        let journal_dir_str = env::var(ENV_VAR_DAYBOOK_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, DEFAULT_JOURNAL_SUBDIR)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&journal_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let journal_dir = PathBuf::from(expanded_path.into_owned());

        if journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        Ok(Config { journal_dir })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Journal directory path is empty" if the journal directory path is empty
    /// - "Journal directory must be an absolute path" if the path is relative
    pub fn validate(&self) -> AppResult<()> {
        if self.journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        if !self.journal_dir.is_absolute() {
            return Err(AppError::Config(
                "Journal directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Directory holding one file per journal entry.
    pub fn entries_dir(&self) -> PathBuf {
        self.journal_dir.join(ENTRIES_SUBDIR)
    }

    /// Path of the persisted search index.
    pub fn index_path(&self) -> PathBuf {
        self.journal_dir.join(INDEX_FILE_NAME)
    }

    /// Path of the optional writing-prompts file.
    pub fn prompts_path(&self) -> PathBuf {
        self.journal_dir.join(PROMPTS_FILE_NAME)
    }
}
