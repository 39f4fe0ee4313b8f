/*!
Record store: the keyed collection of connection profiles and its on-disk mirror.

Layout:
  <dir>/connections.json   pretty-printed JSON object, nickname -> Record

Durability:
  - Every mutation rewrites the whole collection into a temporary file in the
    same directory, fsyncs it, then renames it over `connections.json`.
    The rename is the only visible state transition.
  - Mutations run against a working copy that replaces the in-memory map only
    after the rename succeeded, so a failed write leaves memory and disk at the
    previous state.

Concurrency:
  - One `RwLock` guards the map. `add` / `update` / `delete` hold the write lock
    across the mutation and the disk write; `get` / `list` take the read lock.
  - Nothing coordinates separate processes: the last rename wins.
*/

mod error;
mod record;

pub use error::StoreError;
pub use record::{AuthMethod, DEFAULT_PORT, Record, RecordPatch};

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tempfile::NamedTempFile;

use crate::{log_debug, log_error, log_trace};

/// File name of the store inside the configuration directory.
pub const STORE_FILE: &str = "connections.json";

type Records = BTreeMap<String, Record>;

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    records: RwLock<Records>,
}

impl Store {
    /// Open (or initialize) the store in `dir`.
    ///
    /// The directory is created owner-only when missing. A missing store file
    /// yields an empty collection; any other read or parse failure is an error.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        ensure_private_dir(dir)?;
        let path = dir.join(STORE_FILE);
        let records = load(&path)?;
        log_debug!(
            "store opened: {} ({} connection(s))",
            path.display(),
            records.len()
        );
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Canonical store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add(&self, record: Record) -> Result<(), StoreError> {
        self.mutate(|records| {
            if records.contains_key(&record.nickname) {
                return Err(StoreError::Duplicate(record.nickname.clone()));
            }
            records.insert(record.nickname.clone(), record);
            Ok(())
        })
    }

    /// Apply `patch` to an existing record and return the result.
    pub fn update(&self, nickname: &str, patch: &RecordPatch) -> Result<Record, StoreError> {
        self.mutate(|records| {
            let record = records
                .get_mut(nickname)
                .ok_or_else(|| StoreError::NotFound(nickname.to_string()))?;
            patch.apply(record);
            Ok(record.clone())
        })
    }

    /// Remove a record, returning what was stored.
    pub fn delete(&self, nickname: &str) -> Result<Record, StoreError> {
        self.mutate(|records| {
            records
                .remove(nickname)
                .ok_or_else(|| StoreError::NotFound(nickname.to_string()))
        })
    }

    pub fn get(&self, nickname: &str) -> Result<Record, StoreError> {
        self.read()?
            .get(nickname)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(nickname.to_string()))
    }

    /// All records, ascending by nickname.
    pub fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, StoreError> {
        self.records.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, StoreError> {
        self.records.write().map_err(|_| StoreError::LockPoisoned)
    }

    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Records) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.write()?;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        if let Err(e) = self.persist(&next) {
            log_error!("store write failed, keeping previous state: {e}");
            return Err(e);
        }
        *guard = next;
        Ok(out)
    }

    fn persist(&self, records: &Records) -> Result<(), StoreError> {
        self.persist_with(records, |tmp, body| tmp.write_all(body))
    }

    /// Write `records` through `write` into a temp file, then rename it into place.
    /// Nothing touches `connections.json` until `write` and the fsync succeed.
    fn persist_with(
        &self,
        records: &Records,
        write: impl FnOnce(&mut NamedTempFile, &[u8]) -> io::Result<()>,
    ) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut body = serde_json::to_vec_pretty(records)?;
        body.push(b'\n');

        // NamedTempFile is created 0600 on unix and removed on drop if we bail.
        let mut tmp = tempfile::Builder::new()
            .prefix(".connections-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| StoreError::io("failed to create temp file in", dir, e))?;
        write(&mut tmp, &body)
            .map_err(|e| StoreError::io("failed to write", tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io("failed to sync", tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io("failed to replace", &self.path, e.error))?;

        log_trace!(
            "persisted {} connection(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn ensure_private_dir(dir: &Path) -> Result<(), StoreError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .map_err(|e| StoreError::io("failed to create", dir, e))
}

fn load(path: &Path) -> Result<Records, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Records::new()),
        Err(e) => return Err(StoreError::io("failed to read", path, e)),
    };
    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/* --------------------------------- Tests ---------------------------------- */
