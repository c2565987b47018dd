//! Candidate validation collaborator.
//!
//! # Responsibility
//! - Define the `CustomerValidator` contract consumed by the service layer.
//! - Provide the default field rules for customer candidates.
//!
//! # Invariants
//! - Validation is pure: it never touches the repository or the data file.
//! - Field errors are reported in a stable order: `id`, `name`, `email`.
//! - Ids are free-form strings unless `UuidIdValidator` is chosen.

use crate::model::customer::Customer;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid uuid regex")
});
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .expect("valid email regex")
});

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email must be valid";
pub const ID_INVALID: &str = "ID must be a valid UUID format";

/// One rejected field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Judges a candidate customer before it reaches the repository.
///
/// Returns `Ok(())` when the candidate is acceptable, otherwise every field
/// that failed.
pub trait CustomerValidator {
    fn validate(&self, candidate: &Customer) -> Result<(), Vec<FieldError>>;
}

/// Default rule set: required name and a required well-formed email.
///
/// Emails with surrounding whitespace are rejected, not trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator;

impl RuleValidator {
    fn check_fields(candidate: &Customer, errors: &mut Vec<FieldError>) {
        if candidate.name.trim().is_empty() {
            errors.push(FieldError::new("name", NAME_REQUIRED));
        }

        if candidate.email.trim().is_empty() {
            errors.push(FieldError::new("email", EMAIL_REQUIRED));
        } else if !is_email(&candidate.email) {
            errors.push(FieldError::new("email", EMAIL_INVALID));
        }
    }
}

impl CustomerValidator for RuleValidator {
    fn validate(&self, candidate: &Customer) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        Self::check_fields(candidate, &mut errors);
        into_result(errors)
    }
}

/// `RuleValidator` plus a UUID-shaped id whenever one is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdValidator;

impl CustomerValidator for UuidIdValidator {
    fn validate(&self, candidate: &Customer) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if candidate.has_id() && !is_uuid(candidate.id.as_str()) {
            errors.push(FieldError::new("id", ID_INVALID));
        }
        RuleValidator::check_fields(candidate, &mut errors);
        into_result(errors)
    }
}

/// Accepts any validation; for callers that validate upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl CustomerValidator for AcceptAll {
    fn validate(&self, _candidate: &Customer) -> Result<(), Vec<FieldError>> {
        Ok(())
    }
}

fn into_result(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}
