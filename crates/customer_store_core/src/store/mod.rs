//! Durable storage for the whole customer collection.
//!
//! # Responsibility
//! - Define the `DurableStore` contract used by the repository.
//! - Translate the full collection to and from one file, atomically.
//!
//! # Invariants
//! - A reader of the data file sees either the previous or the next full
//!   collection, never a partial write.
//! - A missing file loads as an empty collection; an unparsable file is an
//!   error and is never silently replaced.

use crate::model::customer::Customer;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod json_file;

pub use json_file::{JsonFileStore, StagedWrite};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure raised by a durable store.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem operation failed (`op` names the step, e.g. `rename`).
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// Collection could not be encoded.
    Serialize(serde_json::Error),
    /// Existing data file could not be decoded.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { op, path, source } => {
                write!(f, "failed to {op} `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize customers: {err}"),
            Self::Corrupt { path, source } => {
                write!(f, "data file `{}` is not a valid customer list: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}

/// Whole-collection persistence backend.
///
/// Implementations must make `save` all-or-nothing: after a failed or
/// interrupted `save`, `load` returns the previously saved collection.
pub trait DurableStore: Send + Sync {
    /// Reads the full collection in stored order.
    fn load(&self) -> StoreResult<Vec<Customer>>;

    /// Replaces the full stored collection.
    fn save(&self, customers: &[Customer]) -> StoreResult<()>;

    /// Writes an empty collection when nothing is stored yet.
    ///
    /// Returns `true` when a new empty collection was written.
    fn initialize(&self) -> StoreResult<bool>;
}
