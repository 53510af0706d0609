//! External summary providers.
//!
//! A provider is an out-of-process text source consulted to augment tip searches. It either
//! contributes a single [`Summary`] for a query or nothing. Failures are reported to the caller
//! of [`SummaryProvider::lookup`], which in this crate is always [`crate::tips::TipService`];
//! the tip service logs and discards them.

use async_trait::async_trait;

use crate::models::Summary;

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Looks up a summary for `query`. `Ok(None)` means the source had nothing to add.
    async fn lookup(&self, query: &str) -> Result<Option<Summary>, ProviderError>;
}
