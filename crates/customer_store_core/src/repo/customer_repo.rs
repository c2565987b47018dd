//! Customer repository contract and file-backed implementation.
//!
//! # Responsibility
//! - Provide create-or-update, point lookup, full listing and delete.
//! - Own the committed in-memory collection and its durable store.
//!
//! # Invariants
//! - Mutations hold `write_lock` across compute, persist and commit, so two
//!   mutations never interleave their disk writes.
//! - The committed collection is swapped only after `DurableStore::save`
//!   succeeded; a failed save leaves memory and disk on the previous state.
//! - Readers clone an `Arc` under a short read lock and never wait on disk I/O.
//!
//! # See also
//! - `store::json_file` for the atomic write path.

use crate::model::customer::{Customer, CustomerId};
use crate::repo::collection::CustomerCollection;
use crate::store::{DurableStore, JsonFileStore, StoreError};
use log::{info, warn};
use parking_lot::{Mutex, RwLock};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure.
#[derive(Debug)]
pub enum RepoError {
    /// The durable store failed; the call had no effect.
    Persistence(StoreError),
    /// Stored data breaks a collection invariant.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored customer data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

/// Repository interface for customer CRUD operations.
pub trait CustomerRepository: Send + Sync {
    /// Returns a copy of every customer in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Customer>>;
    /// Returns a copy of one customer, or `None` when the id is absent.
    fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>>;
    /// Creates (blank id) or replaces (present id) one customer.
    ///
    /// Returns the stored record, including a freshly minted id on create.
    fn save(&self, candidate: &Customer) -> RepoResult<Customer>;
    /// Removes one customer. Returns whether anything was removed.
    fn delete_by_id(&self, id: &str) -> RepoResult<bool>;
}

impl<R: CustomerRepository + ?Sized> CustomerRepository for Arc<R> {
    fn find_all(&self) -> RepoResult<Vec<Customer>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        (**self).find_by_id(id)
    }

    fn save(&self, candidate: &Customer) -> RepoResult<Customer> {
        (**self).save(candidate)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        (**self).delete_by_id(id)
    }
}

/// Lock-guarded repository persisting every mutation through a
/// `DurableStore`.
///
/// The whole collection is held in memory and rewritten on each mutation,
/// which keeps the design simple but limits it to small data sets (hundreds
/// to low thousands of customers).
pub struct FileCustomerRepository<S: DurableStore = JsonFileStore> {
    store: S,
    committed: RwLock<Arc<CustomerCollection>>,
    write_lock: Mutex<()>,
}

impl FileCustomerRepository<JsonFileStore> {
    /// Opens the JSON data file at `path`, creating an empty one if missing.
    ///
    /// # Errors
    /// - `RepoError::Persistence` when the file cannot be created, read, or
    ///   parsed. An unparsable file is never overwritten.
    /// - `RepoError::InvalidData` when stored ids are blank or duplicated.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let store = JsonFileStore::new(path);
        warn!(
            "event=repo_open module=repo status=warn storage=file path={} note=whole_file_rewrite_per_mutation",
            store.path().display()
        );
        Self::with_store(store)
    }
}

impl<S: DurableStore> FileCustomerRepository<S> {
    /// Builds a repository over any durable store.
    pub fn with_store(store: S) -> RepoResult<Self> {
        let created = store.initialize()?;
        let collection = CustomerCollection::from_records(store.load()?)?;

        info!(
            "event=repo_open module=repo status=ok count={} initialized={}",
            collection.len(),
            created
        );

        Ok(Self {
            store,
            committed: RwLock::new(Arc::new(collection)),
            write_lock: Mutex::new(()),
        })
    }

    /// Durable store backing this repository.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn snapshot(&self) -> Arc<CustomerCollection> {
        Arc::clone(&*self.committed.read())
    }

    /// Runs one read-modify-persist cycle under the writer lock.
    ///
    /// `apply` edits a private copy and reports whether it changed anything;
    /// unchanged copies are neither persisted nor committed.
    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut CustomerCollection) -> (T, bool),
    ) -> RepoResult<T> {
        let _writer = self.write_lock.lock();

        let mut next = CustomerCollection::clone(&self.snapshot());
        let (outcome, changed) = apply(&mut next);
        if changed {
            self.store.save(next.as_slice())?;
            *self.committed.write() = Arc::new(next);
        }

        Ok(outcome)
    }
}

impl<S: DurableStore> CustomerRepository for FileCustomerRepository<S> {
    fn find_all(&self) -> RepoResult<Vec<Customer>> {
        Ok(self.snapshot().as_slice().to_vec())
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        Ok(self.snapshot().get(id).cloned())
    }

    fn save(&self, candidate: &Customer) -> RepoResult<Customer> {
        self.mutate(|next| {
            let record = if candidate.has_id() {
                candidate.clone()
            } else {
                candidate.assigned(mint_id(next))
            };
            next.upsert(record.clone());
            (record, true)
        })
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        self.mutate(|next| {
            let removed = next.remove(id).is_some();
            (removed, removed)
        })
    }
}

fn mint_id(existing: &CustomerCollection) -> CustomerId {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !existing.contains(candidate.as_str()) {
            return candidate;
        }
    }
}
