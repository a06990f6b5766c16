//! Address validation and duplicate detection.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

#[allow(clippy::unwrap_used)] // constant pattern
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").unwrap());

/// Returns true if the whole string is a valid email address.
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

/// Returns true if every address is valid. An empty list is trivially valid.
#[must_use]
pub fn all_valid<S: AsRef<str>>(addresses: &[S]) -> bool {
    addresses.iter().all(|a| is_valid_email(a.as_ref()))
}

/// Returns true if any address appears more than once (exact, case-sensitive match).
#[must_use]
pub fn has_duplicates<S: AsRef<str>>(addresses: &[S]) -> bool {
    let unique: HashSet<&str> = addresses.iter().map(AsRef::as_ref).collect();
    addresses.len() > unique.len()
}

/// Appends `candidate` to `selected` unless it is empty.
///
/// Neither validates nor deduplicates; callers check the result with
/// [`all_valid`] and [`has_duplicates`].
#[must_use]
pub fn merge_new_address<S: AsRef<str>>(selected: &[S], candidate: &str) -> Vec<String> {
    let mut addresses: Vec<String> = selected.iter().map(|a| a.as_ref().to_string()).collect();
    if !candidate.is_empty() {
        addresses.push(candidate.to_string());
    }
    addresses
}

/// Rule applied by stores before inserting a new group.
///
/// Only valid addresses are considered; invalid entries are left to the caller.
///
/// # Errors
///
/// Returns [`Error::DuplicateEmail`] if any valid address occurs twice.
pub fn ensure_unique_valid<S: AsRef<str>>(addresses: &[S]) -> Result<()> {
    let valid: Vec<&str> = addresses
        .iter()
        .map(AsRef::as_ref)
        .filter(|a| is_valid_email(a))
        .collect();
    if has_duplicates(&valid) {
        return Err(Error::DuplicateEmail);
    }
    Ok(())
}
