//! In-memory group store.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::debug;

use super::GroupStore;
use crate::group::{Group, GroupId, validation};
use crate::{Error, Result};

/// Group store kept entirely in memory.
///
/// Follows the same rules as [`super::SqliteGroupStore`]. Marking it
/// unavailable reproduces a store without a database connection.
#[derive(Debug)]
pub struct MemoryGroupStore {
    inner: Mutex<Inner>,
    available: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    groups: Vec<Group>,
    last_id: i64,
}

impl Default for MemoryGroupStore {
    fn default() -> Self {
        Self {
            inner: Mutex::default(),
            available: AtomicBool::new(true),
        }
    }
}

impl MemoryGroupStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles whether the store behaves as connected.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::ConnectionUnavailable)
        }
    }
}

impl GroupStore for MemoryGroupStore {
    async fn fetch_all(&self) -> Vec<Group> {
        if self.ensure_available().is_err() {
            return Vec::new();
        }
        self.inner.lock().await.groups.clone()
    }

    async fn create(&self, name: &str, email_addresses: &[String]) -> Result<Group> {
        validation::ensure_unique_valid(email_addresses)?;
        self.ensure_available()?;

        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let group = Group::new(GroupId::new(inner.last_id), name, email_addresses.to_vec());
        inner.groups.push(group.clone());

        debug!("Created group {} in memory", group.id);
        Ok(group)
    }

    async fn update(&self, group: &Group) -> Result<Group> {
        self.ensure_available()?;

        let mut inner = self.inner.lock().await;
        let stored = inner
            .groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or(Error::NotFound(group.id))?;
        stored.clone_from(group);
        Ok(group.clone())
    }

    async fn all_email_addresses(&self) -> BTreeSet<String> {
        if self.ensure_available().is_err() {
            return BTreeSet::new();
        }
        self.inner
            .lock()
            .await
            .groups
            .iter()
            .flat_map(|g| g.email_addresses.iter().cloned())
            .collect()
    }
}
