//! Tests for the documented consistency protocol between archive and index:
//! the persisted index is never pruned, and queries compensate through the
//! live recheck and the rebuild recovery path.

use std::fs;
use tempfile::tempdir;

use daybook::config::Config;
use daybook::entry::{EntryDraft, Timestamp};
use daybook::journal::Journal;

const NOON: i64 = 1705320000000;

fn draft(ts: i64, text: &str) -> EntryDraft {
    EntryDraft {
        date: Timestamp::from_millis(ts),
        mood: String::new(),
        title: String::new(),
        prompt: String::new(),
        text: text.to_string(),
        tags: Vec::new(),
    }
}

fn config_at(dir: &std::path::Path) -> Config {
    Config {
        journal_dir: dir.to_path_buf(),
    }
}

#[test]
fn test_index_file_is_a_prefix_to_timestamps_object() {
    let temp_dir = tempdir().expect("tempdir");
    let config = config_at(temp_dir.path());

    let ts = {
        let mut journal = Journal::open(&config).expect("open");
        let ts = journal.create_entry(draft(NOON, "whale")).expect("create");
        journal.flush();
        ts
    };

    let raw = fs::read_to_string(config.index_path()).expect("read index");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("index is not JSON");
    let object = value.as_object().expect("index is not an object");

    // Every prefix of "whale" is a key, each holding both the entry and the
    // day timestamp.
    for prefix in ["w", "wh", "wha", "whal", "whale"] {
        let timestamps = object
            .get(prefix)
            .and_then(|v| v.as_array())
            .unwrap_or_else(|| panic!("prefix {:?} missing from index", prefix));
        let millis: Vec<i64> = timestamps.iter().filter_map(|v| v.as_i64()).collect();
        assert!(millis.contains(&ts.millis()));
        assert!(millis.contains(&ts.start_of_day().millis()));
    }
}

#[test]
fn test_stale_reference_survives_in_file_but_not_in_listing() {
    let temp_dir = tempdir().expect("tempdir");
    let config = config_at(temp_dir.path());
    let mut journal = Journal::open(&config).expect("open");

    let ts = journal
        .create_entry(draft(NOON, "a whale offshore"))
        .expect("create");
    journal
        .update_entry(ts, draft(NOON, "nothing at sea"))
        .expect("update");
    journal.flush();

    // The persisted index still references the removed word.
    let raw = fs::read_to_string(config.index_path()).expect("read index");
    assert!(raw.contains("whale"), "index should keep stale vocabulary");

    // The entry listing does not, thanks to the live recheck. The day
    // itself may stay listed (day filtering is index-only by design).
    journal.set_search_query("whale");
    assert!(journal.visible_entries(ts.day()).is_empty());
}

#[test]
fn test_deleting_an_entry_leaves_index_untouched() {
    let temp_dir = tempdir().expect("tempdir");
    let config = config_at(temp_dir.path());
    let mut journal = Journal::open(&config).expect("open");

    let ts = journal.create_entry(draft(NOON, "ephemeral")).expect("create");
    journal.flush();
    journal.delete_entry(ts);

    // No index write happens on delete; the stale reference remains.
    let raw = fs::read_to_string(config.index_path()).expect("read index");
    assert!(raw.contains("ephemeral"));

    // But the archive listing no longer shows the entry or its day.
    journal.set_search_query("ephemeral");
    assert!(journal.visible_entries(ts.day()).is_empty());
}

#[test]
fn test_rebuild_prunes_stale_references() {
    let temp_dir = tempdir().expect("tempdir");
    let config = config_at(temp_dir.path());

    {
        let mut journal = Journal::open(&config).expect("open");
        let ts = journal
            .create_entry(draft(NOON, "a whale offshore"))
            .expect("create");
        journal
            .update_entry(ts, draft(NOON, "nothing at sea"))
            .expect("update");
        journal.flush();
    }

    // Drop the index and reopen: the startup check rebuilds from the
    // archive, which only contains the edited content.
    fs::remove_file(config.index_path()).expect("remove index");
    let mut journal = Journal::open(&config).expect("reopen");
    journal.flush();

    let raw = fs::read_to_string(config.index_path()).expect("read index");
    assert!(!raw.contains("whale"), "rebuild should shed stale vocabulary");

    journal.set_search_query("nothing");
    let ts = Timestamp::from_millis(NOON);
    assert_eq!(journal.visible_entries(ts.day()), vec![ts]);
}

#[test]
fn test_startup_without_entries_does_not_rebuild() {
    let temp_dir = tempdir().expect("tempdir");
    let config = config_at(temp_dir.path());

    let journal = Journal::open(&config).expect("open");
    journal.flush();

    // Empty archive + empty index: nothing to recover, no index write.
    assert!(!config.index_path().exists());
}
