use crate::allocator::ShortenParams;
use crate::error::Result;
use crate::stats::StatsView;
use async_trait::async_trait;
use burrow_core::LinkRecord;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns the stored record.
    async fn shorten(&self, params: ShortenParams) -> Result<LinkRecord>;

    /// Resolves a short code to the URL it redirects to.
    /// Fails with `NotFound` or `Expired` when there is nothing to follow.
    async fn resolve(&self, code: &str) -> Result<String>;

    /// Returns expiry and lifetime statistics for a short code.
    async fn stats(&self, code: &str) -> Result<StatsView>;
}
