//! Constants used throughout the crate.
//!
//! This module contains all constants used in the daybook library, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Configuration Keys & Environment Variables
/// Environment variable for specifying the daybook journal directory.
pub const ENV_VAR_DAYBOOK_DIR: &str = "DAYBOOK_DIR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for journal data within the user's home directory.
pub const DEFAULT_JOURNAL_SUBDIR: &str = "Documents/daybook";

// File System Parameters
/// Sub-directory of the journal directory holding one file per entry.
pub const ENTRIES_SUBDIR: &str = "entries";
/// File name of the persisted search index, stored next to the entries dir.
pub const INDEX_FILE_NAME: &str = "index.json";
/// File name of the optional writing-prompts file.
pub const PROMPTS_FILE_NAME: &str = "prompts.txt";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "daybook";
