//! Insertion-ordered customer collection with a primary-key index.
//!
//! # Invariants
//! - `index[id] == position of id in items` for every stored customer.
//! - Replacing a customer keeps its position; removal shifts later ones down.

use crate::model::customer::{Customer, CustomerId};
use crate::repo::customer_repo::{RepoError, RepoResult};
use std::collections::HashMap;

/// Whole-collection value held by the repository and cloned on mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerCollection {
    items: Vec<Customer>,
    index: HashMap<CustomerId, usize>,
}

impl CustomerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from stored records, keeping their order.
    ///
    /// # Errors
    /// - `RepoError::InvalidData` when a record has a blank id or an id
    ///   appears twice.
    pub fn from_records(records: Vec<Customer>) -> RepoResult<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, customer) in records.iter().enumerate() {
            if !customer.has_id() {
                return Err(RepoError::InvalidData(format!(
                    "stored customer at position {position} has no id"
                )));
            }
            if index.insert(customer.id.clone(), position).is_some() {
                return Err(RepoError::InvalidData(format!(
                    "duplicate customer id `{}` in stored data",
                    customer.id
                )));
            }
        }

        Ok(Self {
            items: records,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Customer] {
        &self.items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Inserts at the end, or replaces in place when the id already exists.
    ///
    /// Returns `true` when the customer was newly inserted.
    pub fn upsert(&mut self, customer: Customer) -> bool {
        if let Some(&position) = self.index.get(customer.id.as_str()) {
            self.items[position] = customer;
            return false;
        }

        self.index.insert(customer.id.clone(), self.items.len());
        self.items.push(customer);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Customer> {
        let position = self.index.remove(id)?;
        let removed = self.items.remove(position);
        for customer in &self.items[position..] {
            if let Some(slot) = self.index.get_mut(customer.id.as_str()) {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}
