//! Key-value storage seam for the entry archive.
//!
//! The archive treats its backing directory as a flat key-value store: the
//! storage key is the entry timestamp's decimal rendering and the value is
//! the encoded record. Putting that behind the `EntryStore` trait keeps the
//! directory layout an implementation detail, so an embedded key-value
//! engine could be substituted without touching the archive or facade logic.

use crate::errors::{AppResult, ArchiveError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat key-value storage for encoded entry records.
///
/// Keys are plain file-name-safe strings. Implementations must treat a
/// missing key as `Ok(None)` on `get`, and must report an unreadable backing
/// store as an empty key listing rather than an error.
pub trait EntryStore {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Durably writes `bytes` under `key`, replacing any previous value.
    fn put(&self, key: &str, bytes: &[u8]) -> AppResult<()>;

    /// Removes the value stored under `key`.
    fn delete(&self, key: &str) -> AppResult<()>;

    /// Lists every key currently present, in no particular order.
    ///
    /// An unreadable store yields an empty listing.
    fn list_keys(&self) -> Vec<String>;
}

/// One-file-per-key store backed by a single flat directory.
#[derive(Debug)]
pub struct FsEntryStore {
    dir: PathBuf,
}

impl FsEntryStore {
    /// Opens (and creates if necessary) the store directory.
    ///
    /// On unix the directory is created with owner-only permissions, since
    /// journal content is private by nature.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the directory cannot be created.
    pub fn open(dir: &Path) -> AppResult<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Failed to create archive directory: {}", e),
                )
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions =
                    fs::Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
                fs::set_permissions(dir, permissions).map_err(|e| {
                    io::Error::new(
                        e.kind(),
                        format!("Failed to set permissions on archive directory: {}", e),
                    )
                })?;
            }
        }

        Ok(FsEntryStore {
            dir: dir.to_path_buf(),
        })
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl EntryStore for FsEntryStore {
    fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> AppResult<()> {
        let path = self.path_for(key);
        fs::write(&path, bytes).map_err(|source| ArchiveError::WriteFailed { path, source })?;
        Ok(())
    }

    fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key);
        fs::remove_file(&path).map_err(|source| ArchiveError::DeleteFailed { path, source })?;
        Ok(())
    }

    fn list_keys(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("archive directory unreadable: {}", e);
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_directory() {
        let tmp = tempdir().expect("tempdir");
        let dir = tmp.path().join("entries");
        assert!(!dir.exists());

        let _store = FsEntryStore::open(&dir).expect("open store");
        assert!(dir.is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = fs::metadata(&dir).expect("metadata");
            assert_eq!(metadata.permissions().mode() & 0o777, 0o700);
        }
    }

    #[test]
    fn test_put_get_round_trip() {
        let tmp = tempdir().expect("tempdir");
        let store = FsEntryStore::open(tmp.path()).expect("open store");

        store.put("12345", b"payload").expect("put");
        let value = store.get("12345").expect("get");
        assert_eq!(value.as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let tmp = tempdir().expect("tempdir");
        let store = FsEntryStore::open(tmp.path()).expect("open store");
        assert!(store.get("nope").expect("get").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let tmp = tempdir().expect("tempdir");
        let store = FsEntryStore::open(tmp.path()).expect("open store");

        store.put("k", b"first").expect("put");
        store.put("k", b"second").expect("put");
        assert_eq!(store.get("k").expect("get").as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn test_delete_removes_key() {
        let tmp = tempdir().expect("tempdir");
        let store = FsEntryStore::open(tmp.path()).expect("open store");

        store.put("k", b"v").expect("put");
        store.delete("k").expect("delete");
        assert!(store.get("k").expect("get").is_none());
        assert!(store.delete("k").is_err());
    }

    #[test]
    fn test_list_keys_reflects_contents() {
        let tmp = tempdir().expect("tempdir");
        let store = FsEntryStore::open(tmp.path()).expect("open store");

        store.put("100", b"a").expect("put");
        store.put("200", b"b").expect("put");

        let mut keys = store.list_keys();
        keys.sort();
        assert_eq!(keys, vec!["100", "200"]);
    }

    #[test]
    fn test_list_keys_on_missing_directory_is_empty() {
        let tmp = tempdir().expect("tempdir");
        let dir = tmp.path().join("entries");
        let store = FsEntryStore::open(&dir).expect("open store");
        fs::remove_dir_all(&dir).expect("remove dir");

        assert!(store.list_keys().is_empty());
    }
}
