//! Input validation ahead of a lookup.

use crate::notify::{NoticeLevel, Notifier};
use leakcheck_core::{Identifier, QueryKind, ValidationError};
use std::sync::Arc;

/// Validates raw input and tags it with the selected [`QueryKind`].
///
/// On failure the user is told through the [`Notifier`]; nothing else changes.
#[derive(Clone)]
pub struct Normalizer {
    notifier: Arc<dyn Notifier>,
}

impl Normalizer {
    /// Create a normalizer reporting failures to `notifier`.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Validate `raw` as an identifier of `kind`.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyInput`] when the trimmed input is empty.
    pub fn validate(&self, raw: &str, kind: QueryKind) -> Result<Identifier, ValidationError> {
        Identifier::new(raw, kind).inspect_err(|e| {
            tracing::debug!("Rejected {} input: {}", kind, e);
            self.notifier.notify(&e.to_string(), NoticeLevel::Error);
        })
    }
}
