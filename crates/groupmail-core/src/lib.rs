//! # groupmail-core
//!
//! Core logic for `GroupMail`, a manager for named groups of email addresses.
//!
//! This crate provides:
//! - Group model and the comma-delimited address column codec
//! - Address validation and duplicate detection
//! - Local storage (`SQLite`) behind the [`GroupStore`] trait, plus an in-memory fake
//! - [`GroupCoordinator`], the observable application state used by presentation layers
//! - Mail composer hand-off through a `mailto:` URL
//! - Settings for locating the database

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod composer;
pub mod coordinator;
mod error;
pub mod group;
pub mod settings;
pub mod store;

pub use composer::{MailComposer, SystemMailComposer, mailto_url};
pub use coordinator::{ErrorState, GroupCoordinator, GroupState};
pub use error::{Error, Result};
pub use group::{Group, GroupId, decode_addresses, encode_addresses};
pub use settings::Settings;
pub use store::{GroupStore, MemoryGroupStore, SqliteGroupStore};
