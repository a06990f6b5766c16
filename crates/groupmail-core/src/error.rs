//! Error types for the core library.

use thiserror::Error;

use crate::group::GroupId;

/// Errors that can occur in core operations.
///
/// The `Display` text of each variant is what the coordinator shows to the user.
#[derive(Debug, Error)]
pub enum Error {
    /// Group name is empty.
    #[error("Group Name can't be empty")]
    EmptyName,

    /// Group has no email addresses.
    #[error("There should be at least one email id for the group.")]
    EmptyAddressList,

    /// A submitted address list contains an invalid or repeated entry.
    #[error("Invalid or duplicate email address")]
    InvalidOrDuplicate,

    /// Valid addresses passed to create contain duplicates.
    #[error("Duplicate email addresses are not allowed")]
    DuplicateEmail,

    /// No stored group has the given ID.
    #[error("Group not found: {0}")]
    NotFound(GroupId),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Write(#[from] sqlx::Error),

    /// The store has no database connection.
    #[error("Database connection unavailable")]
    ConnectionUnavailable,

    /// The system mail composer could not be launched.
    #[error("Mail Composer Not Found")]
    ComposerUnavailable,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(Error::EmptyName.to_string(), "Group Name can't be empty");
        assert_eq!(
            Error::EmptyAddressList.to_string(),
            "There should be at least one email id for the group."
        );
        assert_eq!(
            Error::ComposerUnavailable.to_string(),
            "Mail Composer Not Found"
        );
        assert_eq!(
            Error::NotFound(GroupId::new(7)).to_string(),
            "Group not found: 7"
        );
    }

    #[test]
    fn test_database_errors_read_neutrally() {
        let message = Error::Write(sqlx::Error::PoolClosed).to_string();
        assert!(message.starts_with("Database error: "));
    }
}
