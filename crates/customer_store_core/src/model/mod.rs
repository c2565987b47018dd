//! Domain model for the customer store.
//!
//! # Responsibility
//! - Define the single record kind held by the store.
//! - Define the validation collaborator contract used by the service layer.
//!
//! # Invariants
//! - A `Customer` keeps its `id` for its whole lifetime once assigned.
//! - The repository never calls the validator; only the service layer does.

pub mod customer;
pub mod validation;
