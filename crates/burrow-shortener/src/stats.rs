use crate::error::Result;
use crate::resolver::fetch;
use burrow_core::{Clock, LinkRecord, ReadRepository, ShortCode};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// Usage statistics for a single link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsView {
    pub shortcode: ShortCode,
    pub long_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub is_expired: bool,
    /// Whole seconds left before expiry, floored; 0 once expired.
    pub time_until_expiry_seconds: i64,
    /// Whole minutes between creation and expiry, floored. Does not depend
    /// on when the stats are read.
    pub total_lifetime_minutes: i64,
}

impl StatsView {
    /// Derives the view of `record` as seen at `now`.
    pub fn compute(record: LinkRecord, now: Timestamp) -> Self {
        let is_expired = record.is_expired(now);
        let time_until_expiry_seconds = if is_expired {
            0
        } else {
            record.expires_at.duration_since(now).as_secs().max(0)
        };
        let total_lifetime_minutes = record.lifetime().as_secs() / 60;

        Self {
            shortcode: record.shortcode,
            long_url: record.long_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            is_expired,
            time_until_expiry_seconds,
            total_lifetime_minutes,
        }
    }
}

#[derive(Debug)]
pub struct StatsCalculator<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for StatsCalculator<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ReadRepository, C: Clock> StatsCalculator<R, C> {
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the stats for `code`, expired or not, or `NotFound`.
    pub async fn stats(&self, code: &str) -> Result<StatsView> {
        trace!(code = %code, "computing stats");
        let record = fetch(self.repository.as_ref(), code).await?;
        Ok(StatsView::compute(record, self.clock.now()))
    }
}
