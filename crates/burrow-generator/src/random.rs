use crate::Generator;
use burrow_core::{ShortCode, ALPHABET};

/// Default number of characters in a generated code (62^6 ≈ 5.7e10 codes).
pub const DEFAULT_LENGTH: usize = 6;

/// Draws each character uniformly at random from the 62-character
/// alphanumeric alphabet.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }

    /// A zero length is bumped to 1 so every candidate is a valid code.
    pub fn with_length(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let code: String = std::iter::repeat_with(|| {
            ALPHABET[rand::random_range(0..ALPHABET.len())] as char
        })
        .take(self.length)
        .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::is_valid_format;
    use std::collections::HashSet;

    #[test]
    fn generates_six_alphanumeric_characters_by_default() {
        let generator = RandomGenerator::new();

        for _ in 0..1_000 {
            let code = generator.generate();
            assert_eq!(code.len(), 6);
            assert!(is_valid_format(code.as_str()), "bad code {code}");
        }
    }

    #[test]
    fn respects_configured_length() {
        assert_eq!(RandomGenerator::with_length(10).generate().len(), 10);
        assert_eq!(RandomGenerator::with_length(0).generate().len(), 1);
    }

    #[test]
    fn candidates_rarely_repeat() {
        let generator = RandomGenerator::new();
        let codes: HashSet<_> = (0..1_000).map(|_| generator.generate()).collect();
        // 1000 draws from 62^6 codes; a handful of duplicates would already be
        // astronomically unlikely.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn uses_the_whole_alphabet() {
        let generator = RandomGenerator::with_length(64);
        let seen: HashSet<char> = (0..200)
            .flat_map(|_| generator.generate().as_str().chars().collect::<Vec<_>>())
            .collect();
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
