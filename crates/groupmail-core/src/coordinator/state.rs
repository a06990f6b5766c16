//! Observable application state.

use crate::group::Group;

/// Snapshot of everything a presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupState {
    /// Groups as of the last successful store operation.
    pub groups: Vec<Group>,
    /// Group targeted by the next detail or compose action.
    pub selected_group: Option<Group>,
    /// Current user-facing error.
    pub error: ErrorState,
}

/// A single error message and whether it is currently shown.
///
/// There is no queue: a new error replaces the previous message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    /// Last error message.
    pub message: String,
    /// Whether the message is visible.
    pub visible: bool,
}

impl ErrorState {
    pub(super) fn show(&mut self, message: String) {
        self.message = message;
        self.visible = true;
    }

    pub(super) const fn dismiss(&mut self) {
        self.visible = false;
    }
}
