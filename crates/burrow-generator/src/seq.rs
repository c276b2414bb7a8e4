use crate::Generator;
use burrow_core::{is_valid_format, CoreError, ShortCode};
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic short code generator using a sequential counter.
///
/// This generator produces codes like "bw000000", "bw000001", etc. Handy for
/// tests and for tooling that wants predictable codes; it does not remember
/// codes issued by earlier processes, so the allocator's collision retry is
/// what keeps it correct against a persistent store.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix must itself be a valid (alphanumeric) short code.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, CoreError> {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Result<Self, CoreError> {
        let prefix = prefix.into();
        if !is_valid_format(&prefix) {
            return Err(CoreError::InvalidShortCode(format!(
                "generator prefix must be alphanumeric: '{}'",
                prefix
            )));
        }
        Ok(Self {
            counter: AtomicU64::new(offset),
            prefix,
        })
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_generator_produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("bw").unwrap();

        assert_eq!(generator.generate().as_str(), "bw000000");
        assert_eq!(generator.generate().as_str(), "bw000001");
        assert_eq!(generator.generate().as_str(), "bw000002");
    }

    #[test]
    fn seq_generator_with_offset() {
        let generator = SeqGenerator::with_offset("bw", 1000).unwrap();

        assert_eq!(generator.generate().as_str(), "bw001000");
        assert_eq!(generator.generate().as_str(), "bw001001");
    }

    #[test]
    fn rejects_non_alphanumeric_prefix() {
        assert!(SeqGenerator::with_prefix("node-a").is_err());
        assert!(SeqGenerator::with_prefix("").is_err());
    }

    #[test]
    fn generated_codes_are_valid() {
        let generator = SeqGenerator::with_prefix("nodeA").unwrap();
        let code = generator.generate();
        assert!(ShortCode::new(code.as_str()).is_ok());
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("bw").unwrap();
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        // Original continues from 2
        assert_eq!(generator.generate().as_str(), "bw000002");

        // Clone also continues from 2 (same counter value)
        assert_eq!(cloned.generate().as_str(), "bw000002");
    }
}
