//! Core of the customer store.
//! This crate owns the customer collection, its data file, and the use-case
//! rules around them; transports only call into it.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{Customer, CustomerId};
pub use model::validation::{
    AcceptAll, CustomerValidator, FieldError, RuleValidator, UuidIdValidator,
};
pub use repo::collection::CustomerCollection;
pub use repo::customer_repo::{CustomerRepository, FileCustomerRepository, RepoError, RepoResult};
pub use service::customer_service::{CustomerService, ErrorKind, ServiceError, ServiceResult};
pub use service::page::{
    paginate, PageError, PageRequest, PageResult, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use store::{DurableStore, JsonFileStore, StagedWrite, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
