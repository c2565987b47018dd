//! Customer domain model.
//!
//! # Responsibility
//! - Define the canonical customer record (`id`, `name`, `email`).
//! - Provide construction helpers for blank (unassigned) and fixed ids.
//!
//! # Invariants
//! - A blank `id` means "not yet assigned"; the repository mints one on save.
//! - Wire and on-disk field names are exactly `id`, `name`, `email`.

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a customer inside one store.
///
/// Minted as a UUID v4 string by the repository, but any non-blank string
/// supplied by a caller is accepted as-is.
pub type CustomerId = String;

/// Canonical customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Empty until the repository assigns one. `null` on the wire reads as empty.
    #[serde(default, deserialize_with = "deserialize_blank_id")]
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl Customer {
    /// Creates a candidate customer without an id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(String::new(), name, email)
    }

    /// Creates a customer with a caller-provided id.
    ///
    /// Used by update paths and imports where identity already exists.
    pub fn with_id(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns whether this record already carries a usable id.
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Returns a copy of this record carrying `id`, keeping name and email.
    pub fn assigned(&self, id: impl Into<CustomerId>) -> Self {
        Self::with_id(id, self.name.clone(), self.email.clone())
    }
}

fn deserialize_blank_id<'de, D>(deserializer: D) -> Result<CustomerId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::Customer;

    #[test]
    fn null_and_missing_ids_read_as_blank() {
        let missing: Customer =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
        let null: Customer =
            serde_json::from_str(r#"{"id":null,"name":"Ada","email":"ada@example.com"}"#)
                .unwrap();

        assert!(!missing.has_id());
        assert!(!null.has_id());
        assert_eq!(missing, null);
    }

    #[test]
    fn whitespace_id_is_not_an_id() {
        assert!(!Customer::with_id("   ", "Ada", "ada@example.com").has_id());
        assert!(Customer::with_id("c-1", "Ada", "ada@example.com").has_id());
    }
}
