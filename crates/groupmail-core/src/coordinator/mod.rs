//! Application façade between presentation and storage.
//!
//! [`GroupCoordinator`] owns the loaded groups, the current selection and the
//! visible error. Presentation layers observe it through [`GroupCoordinator::subscribe`]
//! and drive it through its operations.

mod state;

use std::collections::BTreeSet;

use tokio::sync::watch;
use tracing::debug;

pub use state::{ErrorState, GroupState};

use crate::Error;
use crate::composer::MailComposer;
use crate::group::Group;
use crate::store::GroupStore;

/// Coordinates group edits, selection and error reporting over a [`GroupStore`].
#[derive(Debug)]
pub struct GroupCoordinator<S> {
    store: S,
    state: watch::Sender<GroupState>,
}

impl<S: GroupStore> GroupCoordinator<S> {
    /// Creates a coordinator with no groups loaded.
    #[must_use]
    pub fn new(store: S) -> Self {
        let (state, _) = watch::channel(GroupState::default());
        Self { store, state }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GroupState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> GroupState {
        self.state.borrow().clone()
    }

    /// Replaces the loaded groups with the store's contents.
    pub async fn load_groups(&mut self) {
        let groups = self.store.fetch_all().await;
        debug!("Loaded {} groups", groups.len());
        self.state.send_modify(|s| s.groups = groups);
    }

    /// Creates a group and appends it to the loaded groups.
    ///
    /// An empty name or address list is reported without touching the store.
    /// Store failures are reported and leave the loaded groups unchanged.
    pub async fn create_group(&mut self, name: &str, email_addresses: &[String]) {
        if let Err(e) = check_not_empty(name, email_addresses) {
            self.show_error(e.to_string());
            return;
        }

        match self.store.create(name, email_addresses).await {
            Ok(group) => self.state.send_modify(|s| s.groups.push(group)),
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Saves changes to a group and replaces the loaded copy with the same ID.
    pub async fn update_group(&mut self, group: &Group) {
        if let Err(e) = check_not_empty(&group.name, &group.email_addresses) {
            self.show_error(e.to_string());
            return;
        }

        match self.store.update(group).await {
            Ok(updated) => self.state.send_modify(|s| {
                if let Some(existing) = s.groups.iter_mut().find(|g| g.id == updated.id) {
                    *existing = updated;
                }
            }),
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Submits the new-group form.
    ///
    /// The typed address is merged into the selection; the result must be
    /// valid and duplicate-free. Returns false if the form was rejected before
    /// reaching [`Self::create_group`].
    pub async fn submit_new_group(
        &mut self,
        name: &str,
        selected: &[String],
        new_email: &str,
    ) -> bool {
        let addresses = self.store.merge_new_address(selected, new_email);
        if !self.store.all_valid(&addresses) || self.store.has_duplicates(&addresses) {
            self.show_error(Error::InvalidOrDuplicate.to_string());
            return false;
        }

        self.create_group(name, &addresses).await;
        true
    }

    /// Submits the edit form for `group`.
    ///
    /// The typed address is added only if it is valid and not yet selected.
    /// Returns false if the form was rejected before reaching [`Self::update_group`].
    pub async fn submit_group_changes(
        &mut self,
        group: &Group,
        name: &str,
        selected: &[String],
        new_email: &str,
    ) -> bool {
        let mut changed = group.with_changes(name, selected.to_vec());
        if self.store.is_valid_email(new_email) && !changed.contains(new_email) {
            changed.email_addresses.push(new_email.to_string());
        }
        if !self.store.all_valid(&changed.email_addresses)
            || self.store.has_duplicates(&changed.email_addresses)
        {
            self.show_error(Error::InvalidOrDuplicate.to_string());
            return false;
        }

        self.update_group(&changed).await;
        true
    }

    /// Selects `group` and opens the composer addressed to its members.
    ///
    /// Returns false and shows an error if the composer is unavailable.
    pub fn compose_mail(&mut self, group: &Group, composer: &impl MailComposer) -> bool {
        self.select_group(group.clone());

        let result = if composer.is_available() {
            composer.compose(&group.email_addresses)
        } else {
            Err(Error::ComposerUnavailable)
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                self.show_error(e.to_string());
                false
            }
        }
    }

    /// Makes `group` the target of subsequent detail or compose actions.
    pub fn select_group(&mut self, group: Group) {
        self.state.send_modify(|s| s.selected_group = Some(group));
    }

    /// Clears the selection.
    pub fn deselect_group(&mut self) {
        self.state.send_modify(|s| s.selected_group = None);
    }

    /// Shows `message`, replacing any current error.
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("Showing error: {message}");
        self.state.send_modify(|s| s.error.show(message));
    }

    /// Hides the current error. Nothing is retried.
    pub fn dismiss_error(&mut self) {
        self.state.send_modify(|s| s.error.dismiss());
    }

    /// Every address used by any stored group.
    pub async fn all_email_addresses(&self) -> BTreeSet<String> {
        self.store.all_email_addresses().await
    }

    /// See [`crate::group::validation::is_valid_email`].
    pub fn is_valid_email(&self, address: &str) -> bool {
        self.store.is_valid_email(address)
    }

    /// See [`crate::group::validation::all_valid`].
    pub fn all_valid(&self, addresses: &[String]) -> bool {
        self.store.all_valid(addresses)
    }

    /// See [`crate::group::validation::has_duplicates`].
    pub fn has_duplicates(&self, addresses: &[String]) -> bool {
        self.store.has_duplicates(addresses)
    }

    /// See [`crate::group::validation::merge_new_address`].
    pub fn merge_new_address(&self, selected: &[String], candidate: &str) -> Vec<String> {
        self.store.merge_new_address(selected, candidate)
    }
}

fn check_not_empty(name: &str, email_addresses: &[String]) -> crate::Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if email_addresses.is_empty() {
        return Err(Error::EmptyAddressList);
    }
    Ok(())
}
