//! File-backed entry archive with a cached day/entry listing.
//!
//! The filesystem is the source of truth; the in-memory day index is a
//! rebuildable cache that exists only to avoid rescanning the directory on
//! every query. All mutations are expected to come from a single logical
//! user-interaction thread, so there is no locking here.

use crate::entry::{JournalEntry, Timestamp};
use crate::errors::{AppResult, ArchiveError};
use crate::store::{EntryStore, FsEntryStore};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Durable CRUD of entries keyed by timestamp.
///
/// Lookup by day goes through a lazily built cache mapping each day to the
/// sorted timestamps of its entries; the cache is derived entirely from the
/// store's key listing and can be reconstructed at any time.
#[derive(Debug)]
pub struct EntryArchive<S: EntryStore = FsEntryStore> {
    store: S,
    // day -> sorted entry timestamps; map keys double as the sorted day set.
    // None until the first listing forces a scan.
    cache: Option<BTreeMap<NaiveDate, Vec<Timestamp>>>,
}

impl<S: EntryStore> EntryArchive<S> {
    /// Wraps a store; the day cache is built on first use.
    pub fn new(store: S) -> Self {
        EntryArchive { store, cache: None }
    }

    /// All distinct days with at least one entry, ascending.
    ///
    /// An unreadable backing store yields an empty listing rather than an
    /// error.
    pub fn all_days(&mut self) -> Vec<NaiveDate> {
        self.cache().keys().copied().collect()
    }

    /// The sorted entry timestamps for `day`, or empty if the day is unknown.
    pub fn entries_for_day(&mut self, day: NaiveDate) -> Vec<Timestamp> {
        self.cache().get(&day).cloned().unwrap_or_default()
    }

    /// Whether the archive holds no entries at all.
    pub fn is_empty(&mut self) -> bool {
        self.cache().is_empty()
    }

    /// Reads and decodes the entry stored under `ts`.
    ///
    /// A missing or undecodable file is treated as absence, never as a fatal
    /// error.
    pub fn get_entry(&self, ts: Timestamp) -> Option<JournalEntry> {
        let bytes = match self.store.get(&ts.file_stem()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                debug!("failed to read entry {}: {}", ts, e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("corrupt entry file {}: {}", ts, e);
                None
            }
        }
    }

    /// Serializes and writes `entry` under its timestamp key.
    ///
    /// On success the day cache is updated in place (kept sorted, no
    /// duplicate timestamps). On failure the error is propagated and the
    /// cache is left untouched, preserving the "cache says it exists iff the
    /// file exists" relationship.
    ///
    /// Two entries with an identical timestamp share a storage key, so the
    /// last write wins.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Archive` if encoding or the write fails.
    pub fn save(&mut self, entry: &JournalEntry) -> AppResult<()> {
        let key = entry.date.file_stem();
        let bytes = serde_json::to_vec(entry).map_err(|source| ArchiveError::EncodeFailed {
            key: key.clone(),
            source,
        })?;

        self.store.put(&key, &bytes)?;
        debug!("saved entry {}", entry.date);

        if let Some(cache) = self.cache.as_mut() {
            let bucket = cache.entry(entry.date.day()).or_default();
            if !bucket.contains(&entry.date) {
                bucket.push(entry.date);
                bucket.sort();
            }
        }
        Ok(())
    }

    /// Removes the entry stored under `ts`.
    ///
    /// The cache is updated first, so a listing that reacts to it sees the
    /// removal immediately even if the disk delete is slow; the day drops
    /// out of the listing entirely when its last entry goes. A timestamp the
    /// cache doesn't know is a no-op. A failed physical delete is logged,
    /// leaving a documented cache/disk mismatch rather than masking it.
    pub fn delete_entry(&mut self, ts: Timestamp) {
        let day = ts.day();
        let cache = self.cache();

        let Some(bucket) = cache.get_mut(&day) else {
            return;
        };
        let Some(pos) = bucket.iter().position(|&t| t == ts) else {
            return;
        };

        bucket.remove(pos);
        if bucket.is_empty() {
            cache.remove(&day);
        }

        if let Err(e) = self.store.delete(&ts.file_stem()) {
            warn!("failed to delete entry {}: {}", ts, e);
        } else {
            debug!("deleted entry {}", ts);
        }
    }

    fn cache(&mut self) -> &mut BTreeMap<NaiveDate, Vec<Timestamp>> {
        if self.cache.is_none() {
            let mut cache: BTreeMap<NaiveDate, Vec<Timestamp>> = BTreeMap::new();
            for key in self.store.list_keys() {
                if let Some(ts) = Timestamp::parse_file_stem(&key) {
                    cache.entry(ts.day()).or_default().push(ts);
                }
            }
            for bucket in cache.values_mut() {
                bucket.sort();
            }
            debug!("built day cache with {} days", cache.len());
            self.cache = Some(cache);
        }
        // Invariant: populated just above when absent.
        self.cache.get_or_insert_with(BTreeMap::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DAY_MS: i64 = 24 * 3600 * 1000;
    // Midday UTC, so both instants fall on the same local day at any offset.
    const NOON: i64 = 1705320000000;

    fn entry(ts: i64, text: &str) -> JournalEntry {
        JournalEntry {
            date: Timestamp::from_millis(ts),
            mood: "🙂".to_string(),
            title: String::new(),
            prompt: String::new(),
            text: text.to_string(),
            tags: Vec::new(),
        }
    }

    fn archive(dir: &std::path::Path) -> EntryArchive {
        EntryArchive::new(FsEntryStore::open(dir).expect("open store"))
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let tmp = tempdir().expect("tempdir");
        let mut archive = archive(tmp.path());

        let e = entry(NOON, "first words");
        archive.save(&e).expect("save");

        let read = archive.get_entry(e.date).expect("entry present");
        assert_eq!(read, e);
    }

    #[test]
    fn test_listing_groups_by_day_and_sorts() {
        let tmp = tempdir().expect("tempdir");
        let mut archive = archive(tmp.path());

        let later = entry(NOON + 3600_000, "later");
        let earlier = entry(NOON, "earlier");
        let other_day = entry(NOON + 2 * DAY_MS, "next");

        archive.save(&later).expect("save");
        archive.save(&earlier).expect("save");
        archive.save(&other_day).expect("save");

        let days = archive.all_days();
        assert_eq!(days.len(), 2);
        assert!(days[0] < days[1]);

        let bucket = archive.entries_for_day(earlier.date.day());
        assert_eq!(bucket, vec![earlier.date, later.date]);
    }

    #[test]
    fn test_cache_rebuilds_from_directory_scan() {
        let tmp = tempdir().expect("tempdir");
        {
            let mut archive = archive(tmp.path());
            archive.save(&entry(NOON, "persisted")).expect("save");
        }

        // A fresh archive over the same directory sees the entry.
        let mut reopened = archive(tmp.path());
        let days = reopened.all_days();
        assert_eq!(days.len(), 1);
        assert_eq!(reopened.entries_for_day(days[0]).len(), 1);
    }

    #[test]
    fn test_scan_skips_foreign_files() {
        let tmp = tempdir().expect("tempdir");
        std::fs::write(tmp.path().join("notes.txt"), b"not an entry").expect("write");

        let mut archive = archive(tmp.path());
        assert!(archive.all_days().is_empty());
    }

    #[test]
    fn test_corrupt_entry_reads_as_absent() {
        let tmp = tempdir().expect("tempdir");
        let ts = Timestamp::from_millis(NOON);
        std::fs::write(tmp.path().join(ts.file_stem()), b"{ not json").expect("write");

        let archive = archive(tmp.path());
        assert!(archive.get_entry(ts).is_none());
    }

    #[test]
    fn test_delete_removes_from_listing_immediately() {
        let tmp = tempdir().expect("tempdir");
        let mut archive = archive(tmp.path());

        let a = entry(NOON, "a");
        let b = entry(NOON + 60_000, "b");
        archive.save(&a).expect("save");
        archive.save(&b).expect("save");

        archive.delete_entry(a.date);
        assert_eq!(archive.entries_for_day(a.date.day()), vec![b.date]);
        assert!(archive.get_entry(a.date).is_none());

        // Deleting the last entry of the day drops the day.
        archive.delete_entry(b.date);
        assert!(archive.all_days().is_empty());
    }

    #[test]
    fn test_delete_unknown_timestamp_is_noop() {
        let tmp = tempdir().expect("tempdir");
        let mut archive = archive(tmp.path());

        let e = entry(NOON, "keep me");
        archive.save(&e).expect("save");
        archive.delete_entry(Timestamp::from_millis(NOON + 1));

        assert_eq!(archive.entries_for_day(e.date.day()), vec![e.date]);
        assert!(archive.get_entry(e.date).is_some());
    }

    #[test]
    fn test_save_same_timestamp_last_write_wins() {
        let tmp = tempdir().expect("tempdir");
        let mut archive = archive(tmp.path());

        archive.save(&entry(NOON, "first")).expect("save");
        archive.save(&entry(NOON, "second")).expect("save");

        let ts = Timestamp::from_millis(NOON);
        assert_eq!(archive.entries_for_day(ts.day()), vec![ts]);
        assert_eq!(archive.get_entry(ts).expect("entry").text, "second");
    }
}
