//! JSON file implementation of `DurableStore`.
//!
//! # Responsibility
//! - Store the collection as one pretty-printed JSON array.
//! - Make every save crash-safe via temp file + fsync + rename.
//!
//! # Invariants
//! - Temp files live next to the data file, so the final rename never
//!   crosses a filesystem boundary.
//! - The data file path is only ever replaced by `rename`, never truncated.
//! - On unix the parent directory is synced after the rename, so a committed
//!   save survives power loss.
//! - Temp files orphaned by a crash are removed by `initialize`.

use super::{DurableStore, StoreError, StoreResult};
use crate::model::customer::Customer;
use log::debug;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

const TEMP_SUFFIX: &str = ".tmp";

/// File-backed store holding the collection as a JSON array of
/// `{"id","name","email"}` objects.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the live data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `customers` to a synced temp file without publishing it.
    ///
    /// The live file is untouched until [`StagedWrite::commit`]. Dropping the
    /// staged write discards the temp file.
    pub fn stage(&self, customers: &[Customer]) -> StoreResult<StagedWrite> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir).map_err(|err| StoreError::io("create directory", &dir, err))?;

        let mut temp = tempfile::Builder::new()
            .prefix(&self.temp_prefix())
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&dir)
            .map_err(|err| StoreError::io("create temp file in", &dir, err))?;
        let temp_path = temp.path().to_path_buf();

        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, customers).map_err(StoreError::Serialize)?;
            writer
                .flush()
                .map_err(|err| StoreError::io("write", &temp_path, err))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|err| StoreError::io("sync", &temp_path, err))?;

        Ok(StagedWrite {
            temp,
            target: self.path.clone(),
        })
    }

    /// Deletes temp files a crashed save left next to the data file.
    ///
    /// Returns how many were removed. A missing directory counts as clean.
    pub fn remove_stale_temp_files(&self) -> StoreResult<usize> {
        let dir = self.parent_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(StoreError::io("list directory", &dir, err)),
        };

        let prefix = self.temp_prefix();
        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io("list directory", &dir, err))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(&prefix) || !name.ends_with(TEMP_SUFFIX) {
                continue;
            }

            let path = entry.path();
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(StoreError::io("remove stale temp file", &path, err)),
            }
        }

        if removed > 0 {
            debug!(
                "event=store_cleanup module=store status=ok path={} removed={}",
                self.path.display(),
                removed
            );
        }
        Ok(removed)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn temp_prefix(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "customers".to_string());
        format!(".{name}.")
    }
}

impl DurableStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<Customer>> {
        let started_at = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=store status=ok path={} missing=true",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::io("read", &self.path, err)),
        };

        let customers: Vec<Customer> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "event=store_load module=store status=ok path={} count={} duration_ms={}",
            self.path.display(),
            customers.len(),
            started_at.elapsed().as_millis()
        );
        Ok(customers)
    }

    fn save(&self, customers: &[Customer]) -> StoreResult<()> {
        let started_at = Instant::now();
        self.stage(customers)?.commit()?;
        debug!(
            "event=store_save module=store status=ok path={} count={} duration_ms={}",
            self.path.display(),
            customers.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn initialize(&self) -> StoreResult<bool> {
        self.remove_stale_temp_files()?;

        let exists = self
            .path
            .try_exists()
            .map_err(|err| StoreError::io("stat", &self.path, err))?;
        if exists {
            return Ok(false);
        }

        self.save(&[])?;
        Ok(true)
    }
}

/// A fully written, synced temp file waiting to replace the live data file.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Location of the temp file holding the staged collection.
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Atomically renames the temp file onto the live data file, then syncs
    /// the directory entry.
    pub fn commit(self) -> StoreResult<()> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|err| StoreError::io("rename temp file onto", &target, err.error))?;
        sync_parent_dir(&target)
    }
}

#[cfg(unix)]
fn sync_parent_dir(target: &Path) -> StoreResult<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(dir)
        .and_then(|handle| handle.sync_all())
        .map_err(|err| StoreError::io("sync directory", dir, err))
}

// Directory handles cannot be synced on this platform.
#[cfg(not(unix))]
fn sync_parent_dir(_target: &Path) -> StoreResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::JsonFileStore;
    use std::path::Path;

    #[test]
    fn bare_file_name_stages_in_current_dir() {
        let store = JsonFileStore::new("customers.json");
        assert_eq!(store.parent_dir(), Path::new("."));
        assert_eq!(store.temp_prefix(), ".customers.json.");
    }

    #[test]
    fn nested_path_stages_next_to_data_file() {
        let store = JsonFileStore::new("/var/lib/store/data.json");
        assert_eq!(store.parent_dir(), Path::new("/var/lib/store"));
    }
}
