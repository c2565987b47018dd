//! Repository layer: the single authoritative owner of the customer
//! collection.
//!
//! # Responsibility
//! - Define the `CustomerRepository` contract used by the service layer.
//! - Serialize every mutation through one read-modify-persist critical section.
//! - Hand readers owned copies, never references into live state.
//!
//! # Invariants
//! - At most one customer per id; iteration order is first-insertion order.
//! - In-memory state only changes after the durable store accepted the write.

pub mod collection;
pub mod customer_repo;
