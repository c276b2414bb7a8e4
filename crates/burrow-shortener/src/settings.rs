use typed_builder::TypedBuilder;

/// Validity window applied when the caller does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Upper bound on the validity window: 100 years.
pub const MAX_VALIDITY_MINUTES: i64 = 100 * 366 * 24 * 60;

/// How many generated candidates the allocator tries before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Tunables for the shortener engine.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    #[builder(default = DEFAULT_VALIDITY_MINUTES)]
    pub default_validity_minutes: i64,
    #[builder(default = MAX_VALIDITY_MINUTES)]
    pub max_validity_minutes: i64,
    /// Always at least one attempt is made, even if this is zero.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
