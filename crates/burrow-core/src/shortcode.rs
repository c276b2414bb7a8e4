use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The 62 characters a short code may be built from.
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Returns `true` iff `code` is non-empty and every character is an ASCII
/// letter or digit.
///
/// Anything that would need percent-encoding in a URL path (`-`, `/`, spaces,
/// non-ASCII letters, ...) is rejected.
pub fn is_valid_format(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A validated short code identifier for a shortened URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes are non-empty and contain only `[a-zA-Z0-9]`.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        if !is_valid_format(&code) {
            return Err(CoreError::InvalidShortCode(format!(
                "must be non-empty and contain only alphanumeric characters: '{}'",
                code
            )));
        }
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (generators, rows read back from the store).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(code: ShortCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_62_unique_alphanumerics() {
        let unique: std::collections::HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn valid_codes() {
        assert!(is_valid_format("a"));
        assert!(is_valid_format("promo1"));
        assert!(is_valid_format("ABCxyz0123456789"));
        assert!(ShortCode::new("Abc123").is_ok());
    }

    #[test]
    fn empty_is_invalid() {
        assert!(!is_valid_format(""));
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(!is_valid_format("abc-1"));
        assert!(!is_valid_format("abc_1"));
        assert!(!is_valid_format("abc def"));
        assert!(!is_valid_format("abc/def"));
        assert!(!is_valid_format("abc%20"));
        assert!(!is_valid_format("caf\u{e9}"));
        assert!(ShortCode::new("abc-1").is_err());
    }

    #[test]
    fn display_and_as_str() {
        let code = ShortCode::new("promo1").unwrap();
        assert_eq!(code.to_string(), "promo1");
        assert_eq!(code.as_str(), "promo1");
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn to_url_trims_trailing_slash() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url("http://bur.row"), "http://bur.row/abc123");
        assert_eq!(code.to_url("http://bur.row/"), "http://bur.row/abc123");
    }

    #[test]
    fn deserialize_validates() {
        let ok: ShortCode = serde_json::from_str("\"promo1\"").unwrap();
        assert_eq!(ok.as_str(), "promo1");

        let err = serde_json::from_str::<ShortCode>("\"pro-mo\"");
        assert!(err.is_err());
    }
}
