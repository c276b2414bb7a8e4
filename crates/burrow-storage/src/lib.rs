//! Link store backends.

pub mod memory;
pub mod sqlite;

pub use burrow_core::{ReadRepository, Repository, StorageError};
pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
