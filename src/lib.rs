/*!
# Daybook

Daybook is the persistence and search core of a personal journaling
application: users write dated entries (mood, title, free text, tags),
browse them grouped by day, and search across them with partial-word
queries. This crate deliberately contains no presentation code; a UI layer
drives it exclusively through the [`Journal`] facade.

## Core Features

- One-file-per-entry archive keyed by timestamp, with a cached day listing
- Persisted full-text prefix index supporting partial-word search
- Conjunctive multi-word queries with a live recheck that masks index
  staleness after edits
- Background index persistence and full rebuild as the recovery path
- Writing prompts for the entry editor

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `entry`: Entry records, timestamps and tokenization
- `store`: Key-value seam over the archive directory
- `archive`: Durable entry CRUD with the cached day listing
- `index`: The prefix search index
- `journal`: The facade composing archive and index
- `prompts`: Writing prompt provider

## Usage Example

```no_run
use daybook::{Config, EntryDraft, Journal, Timestamp};

fn main() -> daybook::AppResult<()> {
    let config = Config::load()?;
    let mut journal = Journal::open(&config)?;

    let mut draft = EntryDraft::new(Timestamp::now());
    draft.mood = "🙂".to_string();
    draft.text = "Shipped the search index today.".to_string();
    journal.create_entry(draft)?;

    journal.set_search_query("search");
    for day in journal.visible_days() {
        println!("{day}");
    }
    Ok(())
}
```
*/

/// Durable entry CRUD with the cached day/entry listing
pub mod archive;
/// Configuration loading and management
pub mod config;
/// Centralized constants
pub mod constants;
/// Entry records, timestamps and tokenization
pub mod entry;
/// Error types and utilities for error handling
pub mod errors;
/// Persisted full-text prefix index
pub mod index;
/// The journal facade exposed to the presentation layer
pub mod journal;
/// Writing prompt provider
pub mod prompts;
/// Key-value storage seam for the archive directory
pub mod store;

// Re-export important types for convenience
pub use config::Config;
pub use entry::{EntryDraft, JournalEntry, Timestamp};
pub use errors::{AppError, AppResult};
pub use journal::Journal;
pub use prompts::WritingPrompts;
