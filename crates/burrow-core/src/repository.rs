use crate::error::Result;
use crate::record::LinkRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// A read-only view of a link store.
///
/// The resolver and the stats calculator only need this half of the
/// contract.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given short code, expired or not.
    /// Returns `None` if the code was never issued.
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;

    /// Checks whether a short code has ever been issued.
    ///
    /// Expired records still count: codes are never reused.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record atomically.
    ///
    /// Returns `Err(StorageError::Conflict)` if a record with the same short
    /// code is already present. This is the authoritative uniqueness guard;
    /// a prior [`ReadRepository::exists`] check is only an optimisation.
    async fn insert(&self, record: &LinkRecord) -> Result<()>;
}
