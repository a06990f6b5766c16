//! Group model types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a group, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub i64);

impl GroupId {
    /// Create a new group ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named group of email addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Store-assigned identifier, never changed after creation.
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// Member addresses in insertion order.
    pub email_addresses: Vec<String>,
}

impl Group {
    /// Creates a group value with the given ID.
    #[must_use]
    pub fn new(id: GroupId, name: impl Into<String>, email_addresses: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email_addresses,
        }
    }

    /// Returns a copy with a new name and address list, keeping the ID.
    #[must_use]
    pub fn with_changes(&self, name: impl Into<String>, email_addresses: Vec<String>) -> Self {
        Self::new(self.id, name, email_addresses)
    }

    /// Returns true if the group contains the exact address.
    #[must_use]
    pub fn contains(&self, address: &str) -> bool {
        self.email_addresses.iter().any(|a| a == address)
    }
}
