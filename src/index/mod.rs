//! Persisted full-text prefix index over entry vocabulary.
//!
//! For every indexed token, every non-empty prefix of that token is a key
//! mapping to the set of matching timestamps, so a partial query like "gir"
//! finds "giraffe" with a single lookup instead of a scan. Each insertion
//! records both the entry's own timestamp and its day's start-of-day
//! timestamp, so day-level and entry-level queries work off the same map.
//!
//! The index is never pruned when an entry is edited or deleted; stale
//! references are compensated at query time by [`SearchIndex::matches_live`].
//! Consequently [`SearchIndex::matching_timestamps`] alone is not
//! authoritative and callers must post-filter against current entry content.
//!
//! In-memory mutations are synchronous so queries see them immediately;
//! writing the index file (and the full rebuild scan) happens on a single
//! background worker thread fed through a channel. The map itself sits
//! behind one coarse mutex shared with that worker.

use crate::entry::{tokenize, JournalEntry, Timestamp};
use crate::errors::IndexError;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

type PrefixMap = HashMap<String, BTreeSet<Timestamp>>;

enum IndexJob {
    /// Write the map's current state to disk. Deliberately carries no
    /// payload: the worker snapshots the shared map when the job runs, so a
    /// persist queued behind a rebuild writes the rebuilt map rather than
    /// clobbering it with a stale queue-time copy.
    Persist,
    /// Re-derive the whole map from the archive directory, then persist.
    Rebuild(PathBuf),
    /// Acknowledge once every previously queued job has finished.
    Flush(mpsc::Sender<()>),
}

/// Prefix → timestamp-set index with best-effort background persistence.
pub struct SearchIndex {
    path: PathBuf,
    map: Arc<Mutex<PrefixMap>>,
    jobs: Option<mpsc::Sender<IndexJob>>,
    worker: Option<JoinHandle<()>>,
}

impl SearchIndex {
    /// Opens the index, eagerly loading the persisted map from `path`.
    ///
    /// An absent index file starts empty; a corrupt one is logged and also
    /// starts empty. Either way the facade's startup check can order a
    /// rebuild, so this never fails.
    pub fn open(path: &Path) -> Self {
        let map = Arc::new(Mutex::new(load_map(path)));

        let (tx, rx) = mpsc::channel();
        let worker_map = Arc::clone(&map);
        let worker_path = path.to_path_buf();
        let worker = thread::Builder::new()
            .name("daybook-index".to_string())
            .spawn(move || worker_loop(rx, worker_map, worker_path));

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("failed to start index worker, persistence disabled: {}", e);
                None
            }
        };

        SearchIndex {
            path: path.to_path_buf(),
            map,
            jobs: Some(tx),
            worker,
        }
    }

    /// Whether anything is loaded.
    ///
    /// The facade uses this at startup to decide whether the index file was
    /// lost and a rebuild is needed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Indexes `entry` so it can be found via [`Self::matching_timestamps`].
    ///
    /// The in-memory map is updated synchronously; the on-disk write is
    /// queued on the worker and is best effort (failures are logged, never
    /// surfaced, because the index can always be rebuilt).
    pub fn index(&self, entry: &JournalEntry) {
        index_entry_into(&mut self.lock(), entry);
        self.submit(IndexJob::Persist);
    }

    /// Timestamps matching `query`, at both entry and day granularity.
    ///
    /// The query is tokenized with the same rules as entry content. A result
    /// must match *every* query token (conjunctive semantics): the union of
    /// all per-token candidates is taken first, then any candidate missing
    /// from some token's own set is dropped, which handles absent keys as
    /// empty sets. A query with no tokens yields an empty set; callers treat
    /// an empty query as "no filter" and should not consult the index for it.
    pub fn matching_timestamps(&self, query: &str) -> HashSet<Timestamp> {
        let words = tokenize(query);
        let map = self.lock();

        let mut out = HashSet::new();
        for word in &words {
            if let Some(set) = map.get(word.as_str()) {
                out.extend(set.iter().copied());
            }
        }

        out.retain(|ts| {
            words
                .iter()
                .all(|word| map.get(word.as_str()).is_some_and(|set| set.contains(ts)))
        });
        out
    }

    /// Checks `entry`'s *current* vocabulary against `query`, bypassing the
    /// persisted index.
    ///
    /// True iff every query token is a prefix of some token in the entry.
    /// This is the staleness compensation: an entry edited to remove a
    /// previously indexed word still shows up in [`Self::matching_timestamps`],
    /// but fails this recheck.
    pub fn matches_live(&self, entry: &JournalEntry, query: &str) -> bool {
        let words = tokenize(query);
        if words.is_empty() {
            return true;
        }
        let vocabulary = entry.tokens();
        words
            .iter()
            .all(|word| vocabulary.iter().any(|token| token.starts_with(word.as_str())))
    }

    /// Queues a full rebuild from the entry files in `dir`.
    ///
    /// The worker clears the map, re-tokenizes every decodable file, swaps
    /// the result in and persists it. O(corpus size), so it runs off the
    /// interactive path; queries keep answering from the old map until the
    /// swap.
    pub fn rebuild(&self, dir: &Path) {
        info!("queueing search index rebuild from {}", dir.display());
        self.submit(IndexJob::Rebuild(dir.to_path_buf()));
    }

    /// Blocks until every queued persist/rebuild job has completed.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.submit(IndexJob::Flush(ack_tx));
        let _ = ack_rx.recv();
    }

    fn submit(&self, job: IndexJob) {
        if let Some(jobs) = &self.jobs {
            if jobs.send(job).is_err() {
                warn!("index worker is gone; skipping background index job");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, PrefixMap> {
        // A poisoned lock means the worker panicked mid-update; the map is
        // still usable and rebuildable, so carry on with it.
        self.map.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for SearchIndex {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain remaining jobs and exit.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(jobs: mpsc::Receiver<IndexJob>, map: Arc<Mutex<PrefixMap>>, path: PathBuf) {
    while let Ok(job) = jobs.recv() {
        match job {
            IndexJob::Persist => {
                // Snapshot at execution time, not queue time, so this always
                // writes the map as later jobs ahead of it left it.
                let snapshot = map.lock().unwrap_or_else(|e| e.into_inner()).clone();
                if let Err(e) = persist_map(&path, &snapshot) {
                    warn!("failed to persist search index: {}", e);
                }
            }
            IndexJob::Rebuild(dir) => {
                let rebuilt = scan_directory(&dir);
                info!(
                    "search index rebuilt: {} prefixes from {}",
                    rebuilt.len(),
                    dir.display()
                );
                let snapshot = {
                    let mut map = map.lock().unwrap_or_else(|e| e.into_inner());
                    *map = rebuilt;
                    map.clone()
                };
                if let Err(e) = persist_map(&path, &snapshot) {
                    warn!("failed to persist rebuilt search index: {}", e);
                }
            }
            IndexJob::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

/// Re-derives a prefix map from every decodable entry file in `dir`.
fn scan_directory(dir: &Path) -> PrefixMap {
    let mut map = PrefixMap::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot scan {} for rebuild: {}", dir.display(), e);
            return map;
        }
    };

    for dir_entry in entries.filter_map(|e| e.ok()) {
        let bytes = match fs::read(dir_entry.path()) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };
        if let Ok(entry) = serde_json::from_slice::<JournalEntry>(&bytes) {
            index_entry_into(&mut map, &entry);
        }
    }
    map
}

fn index_entry_into(map: &mut PrefixMap, entry: &JournalEntry) {
    let day = entry.date.start_of_day();
    for token in entry.tokens() {
        let mut prefix = String::new();
        for c in token.chars() {
            prefix.push(c);
            let set = map.entry(prefix.clone()).or_default();
            set.insert(entry.date);
            set.insert(day);
        }
    }
}

fn load_map(path: &Path) -> PrefixMap {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return PrefixMap::new(),
        Err(e) => {
            warn!("cannot read search index {}: {}", path.display(), e);
            return PrefixMap::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(map) => {
            debug!("loaded search index from {}", path.display());
            map
        }
        Err(e) => {
            warn!("corrupt search index {}: {}", path.display(), e);
            PrefixMap::new()
        }
    }
}

fn persist_map(path: &Path, map: &PrefixMap) -> Result<(), IndexError> {
    let bytes = serde_json::to_vec(map).map_err(IndexError::EncodeFailed)?;
    fs::write(path, bytes).map_err(|source| IndexError::PersistFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
