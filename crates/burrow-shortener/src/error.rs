use burrow_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortenerError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("custom shortcode must be alphanumeric: '{0}'")]
    InvalidFormat(String),
    #[error("validity_in_minutes must be between 1 and {max}, got {got}")]
    InvalidValidity { got: i64, max: i64 },
    #[error("shortcode already exists: {0}")]
    AlreadyExists(String),
    #[error("shortcode not found: {0}")]
    NotFound(String),
    #[error("url has expired: {0}")]
    Expired(String),
    #[error("no unused shortcode found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
    #[error("storage error: {0}")]
    StoreFailure(#[source] StorageError),
}

/// Coarse classification of a [`ShortenerError`], one per response status
/// the transport layer hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    InvalidFormat,
    InvalidValidity,
    AlreadyExists,
    NotFound,
    Expired,
    StoreFailure,
}

impl ShortenerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShortenerError::MissingField(_) => ErrorKind::MissingField,
            ShortenerError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            ShortenerError::InvalidValidity { .. } => ErrorKind::InvalidValidity,
            ShortenerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ShortenerError::NotFound(_) => ErrorKind::NotFound,
            ShortenerError::Expired(_) => ErrorKind::Expired,
            ShortenerError::CodeSpaceExhausted { .. } | ShortenerError::StoreFailure(_) => {
                ErrorKind::StoreFailure
            }
        }
    }
}

/// Converts a storage error raised outside an insert.
///
/// `Conflict` only has meaning for inserts, where the allocator handles it
/// itself; anywhere else every storage error is a store failure.
pub(crate) fn store_failure(e: StorageError) -> ShortenerError {
    ShortenerError::StoreFailure(e)
}
