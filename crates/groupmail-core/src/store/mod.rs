//! Group storage.
//!
//! [`GroupStore`] is the capability set the coordinator depends on. Stores
//! differ only in persistence; the address utilities are shared provided
//! methods.

mod memory;
mod sqlite;

use std::collections::BTreeSet;
use std::future::Future;

pub use memory::MemoryGroupStore;
pub use sqlite::SqliteGroupStore;

use crate::Result;
use crate::group::{Group, validation};

/// Persistent storage for groups.
///
/// Read operations never fail: a store that cannot read returns empty
/// results and logs the cause. Write operations always report failure.
pub trait GroupStore {
    /// Returns every stored group in store order.
    fn fetch_all(&self) -> impl Future<Output = Vec<Group>> + Send;

    /// Stores a new group and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateEmail`] if a valid address occurs
    /// twice, [`crate::Error::ConnectionUnavailable`] without a connection,
    /// or [`crate::Error::Write`] if the insert fails.
    fn create(
        &self,
        name: &str,
        email_addresses: &[String],
    ) -> impl Future<Output = Result<Group>> + Send;

    /// Replaces the name and addresses of an existing group.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no group has the ID,
    /// [`crate::Error::ConnectionUnavailable`] without a connection, or
    /// [`crate::Error::Write`] if the update fails.
    fn update(&self, group: &Group) -> impl Future<Output = Result<Group>> + Send;

    /// Returns every address used by any group, deduplicated.
    fn all_email_addresses(&self) -> impl Future<Output = BTreeSet<String>> + Send;

    /// See [`validation::is_valid_email`].
    fn is_valid_email(&self, address: &str) -> bool {
        validation::is_valid_email(address)
    }

    /// See [`validation::all_valid`].
    fn all_valid(&self, addresses: &[String]) -> bool {
        validation::all_valid(addresses)
    }

    /// See [`validation::has_duplicates`].
    fn has_duplicates(&self, addresses: &[String]) -> bool {
        validation::has_duplicates(addresses)
    }

    /// See [`validation::merge_new_address`].
    fn merge_new_address(&self, selected: &[String], candidate: &str) -> Vec<String> {
        validation::merge_new_address(selected, candidate)
    }
}
