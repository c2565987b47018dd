//! Customer use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD and listing entry points for transports.
//! - Run candidate validation before any repository write.
//! - Map repository outcomes onto `ServiceError` and its `ErrorKind`.
//!
//! # Invariants
//! - Invalid candidates never reach the repository.
//! - Listing pages are computed from one `find_all` snapshot.
//! - `update_customer` is last-write-wins once the existence check passed.

use crate::model::customer::{Customer, CustomerId};
use crate::model::validation::{CustomerValidator, FieldError, RuleValidator};
use crate::repo::customer_repo::{CustomerRepository, RepoError};
use crate::service::page::{paginate, PageError, PageRequest, PageResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for customer use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Candidate fields or paging parameters were rejected.
    Validation(Vec<FieldError>),
    /// No customer with this id exists.
    NotFound(CustomerId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

/// Transport-facing classification of a `ServiceError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

impl ErrorKind {
    /// HTTP-style status code for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::Internal => "Internal Server Error",
        }
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::BadRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }

    /// Field-level details; empty unless this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "validation failed")?;
                for (position, field) in errors.iter().enumerate() {
                    let separator = if position == 0 { ": " } else { "; " };
                    write!(f, "{separator}{field}")?;
                }
                Ok(())
            }
            Self::NotFound(id) => write!(f, "customer not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<PageError> for ServiceError {
    fn from(value: PageError) -> Self {
        Self::Validation(vec![FieldError::new("size", value.to_string())])
    }
}

/// Customer service facade over a repository and a validator.
pub struct CustomerService<R: CustomerRepository, V: CustomerValidator = RuleValidator> {
    repo: R,
    validator: V,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a service with the default field rules.
    pub fn new(repo: R) -> Self {
        Self::with_validator(repo, RuleValidator)
    }
}

impl<R: CustomerRepository, V: CustomerValidator> CustomerService<R, V> {
    pub fn with_validator(repo: R, validator: V) -> Self {
        Self { repo, validator }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns every customer in insertion order.
    pub fn get_all_customers(&self) -> ServiceResult<Vec<Customer>> {
        self.repo.find_all().map_err(|err| failed("list", err))
    }

    /// Returns only the content of page `page`.
    pub fn list_customers(&self, page: u32, size: u32) -> ServiceResult<Vec<Customer>> {
        let snapshot = self.get_all_customers()?;
        Ok(paginate(&snapshot, page, size)?.content)
    }

    /// Returns one page with totals, bounding `size` to `1..=MAX_PAGE_SIZE`.
    pub fn list_customers_paged(
        &self,
        request: PageRequest,
    ) -> ServiceResult<PageResult<Customer>> {
        let request = request.checked().map_err(|err| {
            warn!(
                "event=customer_list module=service status=rejected page={} size={}",
                request.page, request.size
            );
            ServiceError::from(err)
        })?;

        let snapshot = self.get_all_customers()?;
        paginate(&snapshot, request.page, request.size).map_err(ServiceError::from)
    }

    pub fn get_customer(&self, id: &str) -> ServiceResult<Customer> {
        self.repo
            .find_by_id(id)
            .map_err(|err| failed("get", err))?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Validates and stores a new customer.
    ///
    /// A blank id is minted by the repository; a supplied id is kept and
    /// replaces any existing customer with that id.
    pub fn add_customer(&self, candidate: &Customer) -> ServiceResult<Customer> {
        self.check("add", candidate)?;

        let saved = self.repo.save(candidate).map_err(|err| failed("add", err))?;
        info!(
            "event=customer_add module=service status=ok customer_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Replaces name and email of an existing customer.
    ///
    /// `id` wins over any id carried by `candidate`; the body id is neither
    /// validated nor stored.
    pub fn update_customer(&self, id: &str, candidate: &Customer) -> ServiceResult<Customer> {
        let record = candidate.assigned(id);
        self.check("update", &record)?;

        if self
            .repo
            .find_by_id(id)
            .map_err(|err| failed("update", err))?
            .is_none()
        {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        let saved = self
            .repo
            .save(&record)
            .map_err(|err| failed("update", err))?;
        info!(
            "event=customer_update module=service status=ok customer_id={}",
            saved.id
        );
        Ok(saved)
    }

    pub fn delete_customer(&self, id: &str) -> ServiceResult<()> {
        if !self.repo.delete_by_id(id).map_err(|err| failed("delete", err))? {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        info!("event=customer_delete module=service status=ok customer_id={id}");
        Ok(())
    }

    fn check(&self, op: &str, candidate: &Customer) -> ServiceResult<()> {
        self.validator.validate(candidate).map_err(|errors| {
            let fields = errors
                .iter()
                .map(|error| error.field.as_str())
                .collect::<Vec<_>>()
                .join(",");
            warn!("event=customer_{op} module=service status=rejected fields={fields}");
            ServiceError::Validation(errors)
        })
    }
}

fn failed(op: &str, err: RepoError) -> ServiceError {
    error!("event=customer_{op} module=service status=error error={err}");
    ServiceError::Repo(err)
}
