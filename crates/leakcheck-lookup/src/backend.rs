//! Lookup backend contract.

use crate::error::Result;
use async_trait::async_trait;
use leakcheck_core::{LeakResult, QueryKind};

/// A source of breach-exposure answers.
///
/// Implementations must be thread-safe (Send + Sync) so a single backend can
/// be shared between sessions and request handlers.
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Look up `value` of the given kind.
    ///
    /// # Errors
    /// Returns a [`LookupError`](crate::LookupError) when the backend cannot
    /// answer. Every variant is recoverable.
    async fn lookup(&self, value: &str, kind: QueryKind) -> Result<LeakResult>;

    /// Short identifier used in logs.
    fn backend_id(&self) -> &str;
}
