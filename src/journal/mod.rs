//! The `Journal` facade coordinating archive and search index.
//!
//! This is the single surface the presentation layer talks to: it owns one
//! [`EntryArchive`] and one [`SearchIndex`], keeps the visible day listing
//! consistent with the live search filter, and applies the admission rule
//! that an entry must record a mood or some text.

use crate::archive::EntryArchive;
use crate::config::Config;
use crate::entry::{EntryDraft, JournalEntry, Timestamp};
use crate::errors::{AppError, AppResult};
use crate::index::SearchIndex;
use crate::store::FsEntryStore;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Coordination point between the entry archive, the search index and the
/// current search filter.
///
/// Mutating operations keep archive and index consistent (archive failures
/// are fatal to the operation, index failures never are) and synchronously
/// recompute the visible day listing.
pub struct Journal {
    archive: EntryArchive<FsEntryStore>,
    index: SearchIndex,
    entries_dir: PathBuf,
    search_query: String,
    visible_days: Vec<NaiveDate>,
}

impl Journal {
    /// Opens the journal described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configuration is invalid, or
    /// `AppError::Io` if the entries directory cannot be created.
    pub fn open(config: &Config) -> AppResult<Self> {
        config.validate()?;
        Self::with_paths(&config.entries_dir(), &config.index_path())
    }

    /// Opens a journal over explicit archive/index paths.
    ///
    /// On construction, if the archive holds entries but the index loaded
    /// empty (fresh install with data restored, or a lost/corrupt index
    /// file), a full index rebuild is queued in the background. An index
    /// that is merely stale by a write is not detected here; rebuild remains
    /// the recovery path for that.
    pub fn with_paths(entries_dir: &Path, index_path: &Path) -> AppResult<Self> {
        let store = FsEntryStore::open(entries_dir)?;
        let mut archive = EntryArchive::new(store);
        let index = SearchIndex::open(index_path);

        if !archive.is_empty() && index.is_empty() {
            info!("archive has entries but index is empty; rebuilding");
            index.rebuild(entries_dir);
        }

        let visible_days = archive.all_days();
        Ok(Journal {
            archive,
            index,
            entries_dir: entries_dir.to_path_buf(),
            search_query: String::new(),
            visible_days,
        })
    }

    /// The current search string (empty means no filter).
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Stores the search string and recomputes the visible day listing.
    ///
    /// An empty (or whitespace-only) query clears the filter and restores
    /// the full listing.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        debug!("search query set to {:?}", self.search_query);
        self.recompute_visible_days();
    }

    /// Days with entries, filtered by the current search string, ascending.
    pub fn visible_days(&self) -> &[NaiveDate] {
        &self.visible_days
    }

    /// Entry timestamps for `day`, filtered by the current search string.
    ///
    /// With an active query an entry is kept only if its day appears in the
    /// index result *and* its current content passes the live recheck; the
    /// recheck exists precisely to mask index staleness from edits that
    /// removed previously matching text.
    pub fn visible_entries(&mut self, day: NaiveDate) -> Vec<Timestamp> {
        let entries = self.archive.entries_for_day(day);
        if self.filter_inactive() {
            return entries;
        }

        let matching = self.index.matching_timestamps(&self.search_query);
        entries
            .into_iter()
            .filter(|ts| {
                if !matching.contains(&ts.start_of_day()) {
                    return false;
                }
                match self.archive.get_entry(*ts) {
                    Some(entry) => self.index.matches_live(&entry, &self.search_query),
                    None => false,
                }
            })
            .collect()
    }

    /// Reads one entry by identifier.
    pub fn entry(&self, ts: Timestamp) -> Option<JournalEntry> {
        self.archive.get_entry(ts)
    }

    /// Creates a new entry from `draft`, keyed by the draft's date.
    ///
    /// Field whitespace is trimmed; the entry is persisted, indexed, and the
    /// visible listing is recomputed. Only the archive write can fail here;
    /// indexing problems are logged by the index and never surface.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` for a draft with neither mood nor text,
    /// or `AppError::Archive` if the write fails (in which case neither the
    /// listing nor the index is touched).
    pub fn create_entry(&mut self, draft: EntryDraft) -> AppResult<Timestamp> {
        let date = draft.date;
        let record = self.admit(draft, date)?;
        self.archive.save(&record)?;
        self.index.index(&record);
        self.recompute_visible_days();
        info!("created entry {}", date);
        Ok(date)
    }

    /// Rewrites the entry stored under `ts` from `draft`.
    ///
    /// The record is written under the draft's date. When that date differs
    /// from `ts` the entry is re-keyed: the new file is written first, then
    /// the old key is deleted, so a crash in between leaves a duplicate
    /// rather than a loss. The index is merged, never pruned, so the old
    /// vocabulary lingers until a rebuild; queries compensate via the live
    /// recheck.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::create_entry`].
    pub fn update_entry(&mut self, ts: Timestamp, draft: EntryDraft) -> AppResult<Timestamp> {
        let new_date = draft.date;
        let record = self.admit(draft, new_date)?;
        self.archive.save(&record)?;
        self.index.index(&record);
        if new_date != ts {
            debug!("entry {} re-keyed to {}", ts, new_date);
            self.archive.delete_entry(ts);
        }
        self.recompute_visible_days();
        info!("updated entry {}", new_date);
        Ok(new_date)
    }

    /// Deletes the entry stored under `ts` and recomputes the listing.
    ///
    /// Index entries for the deleted record are intentionally left behind;
    /// the listing stops showing the entry because the archive no longer
    /// lists it.
    pub fn delete_entry(&mut self, ts: Timestamp) {
        self.archive.delete_entry(ts);
        self.recompute_visible_days();
        info!("deleted entry {}", ts);
    }

    /// Blocks until pending background index work (persists, rebuilds) is
    /// done. Useful at shutdown and in tests.
    pub fn flush(&self) {
        self.index.flush();
    }

    /// Directory holding the entry files (the rebuild source).
    pub fn entries_dir(&self) -> &Path {
        &self.entries_dir
    }

    fn admit(&self, draft: EntryDraft, date: Timestamp) -> AppResult<JournalEntry> {
        if !draft.is_meaningful() {
            return Err(AppError::Journal(
                "an entry needs a mood or some text".to_string(),
            ));
        }
        Ok(draft.into_record(date))
    }

    fn filter_inactive(&self) -> bool {
        self.search_query.trim().is_empty()
    }

    fn recompute_visible_days(&mut self) {
        let days = self.archive.all_days();
        if self.filter_inactive() {
            self.visible_days = days;
            return;
        }

        let matching = self.index.matching_timestamps(&self.search_query);
        self.visible_days = days
            .into_iter()
            .filter(|day| {
                // The day is "present" when its start-of-day timestamp was
                // indexed; derive it from any entry of the day.
                self.archive
                    .entries_for_day(*day)
                    .first()
                    .is_some_and(|ts| matching.contains(&ts.start_of_day()))
            })
            .collect();
    }
}
