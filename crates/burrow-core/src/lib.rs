//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the shared vocabulary used by the generator, the
//! storage backends, the shortener engine and the HTTP gateway: validated
//! short codes, link records, the store contract and the clock abstraction.

pub mod clock;
pub mod error;
pub mod record;
pub mod repository;
pub mod shortcode;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, StorageError};
pub use record::{LinkRecord, Liveness};
pub use repository::{ReadRepository, Repository};
pub use shortcode::{is_valid_format, ShortCode, ALPHABET};
