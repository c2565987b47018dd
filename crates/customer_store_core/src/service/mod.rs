//! Core use-case services.
//!
//! # Responsibility
//! - Sequence validation, repository calls and pagination into use cases.
//! - Translate lower-layer failures into the service error taxonomy that
//!   transports map onto responses.

pub mod customer_service;
pub mod page;
