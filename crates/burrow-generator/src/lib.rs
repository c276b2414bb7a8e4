//! Short code generators.

pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use burrow_core::ShortCode;

/// Trait for generating short code candidates.
///
/// Implementations are pure generators that don't interact with storage.
/// A candidate is not guaranteed to be unused; the allocator checks the
/// store and asks for another one on collision.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces the next candidate. Every candidate must be a valid
    /// alphanumeric short code.
    fn generate(&self) -> Self::Output;
}
