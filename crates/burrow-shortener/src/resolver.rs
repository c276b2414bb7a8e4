use crate::error::{store_failure, Result, ShortenerError};
use burrow_core::{Clock, LinkRecord, Liveness, ReadRepository, ShortCode};
use std::sync::Arc;
use tracing::{debug, trace};

/// Turns a short code back into its destination URL.
///
/// Expiry is decided here at read time; an expired record stays in the store
/// and keeps answering [`ShortenerError::Expired`] rather than `NotFound`.
#[derive(Debug)]
pub struct Resolver<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for Resolver<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ReadRepository, C: Clock> Resolver<R, C> {
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Resolves a short code to the URL it redirects to.
    ///
    /// # Returns
    ///
    /// * `Ok(url)` - The stored `long_url` if the record is still active
    /// * `Err(NotFound)` - If no record was ever stored under `code`
    /// * `Err(Expired)` - If the current time is strictly past `expires_at`
    /// * `Err(StoreFailure)` - If there was an error accessing the repository
    pub async fn resolve(&self, code: &str) -> Result<String> {
        trace!(code = %code, "resolving short code");

        let record = fetch(self.repository.as_ref(), code).await?;

        match record.liveness(self.clock.now()) {
            Liveness::Expired => {
                debug!(code = %code, expires_at = %record.expires_at, "record has expired");
                Err(ShortenerError::Expired(code.to_string()))
            }
            Liveness::Active => {
                debug!(code = %code, url = %record.long_url, "resolved short code");
                Ok(record.long_url)
            }
        }
    }
}

/// Looks up a record, mapping absence to [`ShortenerError::NotFound`].
///
/// A code that is not well formed cannot have been issued, so it is reported
/// as not found without touching the store.
pub(crate) async fn fetch<R: ReadRepository>(repository: &R, code: &str) -> Result<LinkRecord> {
    let Ok(shortcode) = ShortCode::new(code) else {
        trace!(code = %code, "malformed short code");
        return Err(ShortenerError::NotFound(code.to_string()));
    };

    match repository.get(&shortcode).await.map_err(store_failure)? {
        Some(record) => Ok(record),
        None => {
            trace!(code = %code, "short code not found");
            Err(ShortenerError::NotFound(code.to_string()))
        }
    }
}
