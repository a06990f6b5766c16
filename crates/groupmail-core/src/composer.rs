//! Hand-off to the system mail composer.

use tracing::{debug, warn};

use crate::{Error, Result};

/// A facility that opens a new message addressed to the given recipients.
pub trait MailComposer {
    /// Returns true if the composer can be launched at all.
    fn is_available(&self) -> bool;

    /// Opens a new message with `recipients` in the "To" field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComposerUnavailable`] if the composer cannot be launched.
    fn compose(&self, recipients: &[String]) -> Result<()>;
}

/// Composer that opens a `mailto:` URL with the platform handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMailComposer;

impl MailComposer for SystemMailComposer {
    fn is_available(&self) -> bool {
        true
    }

    fn compose(&self, recipients: &[String]) -> Result<()> {
        let url = mailto_url(recipients);
        opener::open(&url).map_err(|e| {
            warn!("Failed to open mail composer: {e}");
            Error::ComposerUnavailable
        })?;
        debug!("Opened mail composer for {} recipients", recipients.len());
        Ok(())
    }
}

/// Builds a `mailto:` URL with every recipient in the "To" field.
///
/// Valid addresses only need `%` escaped.
#[must_use]
pub fn mailto_url(recipients: &[String]) -> String {
    let to = recipients
        .iter()
        .map(|r| r.replace('%', "%25"))
        .collect::<Vec<_>>()
        .join(",");
    format!("mailto:{to}")
}
