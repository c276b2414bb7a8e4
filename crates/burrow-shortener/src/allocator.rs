use crate::error::{store_failure, Result, ShortenerError};
use crate::settings::ShortenerSettings;
use burrow_core::{Clock, LinkRecord, ReadRepository, Repository, ShortCode, StorageError};
use burrow_generator::Generator;
use jiff::{RoundMode, SignedDuration, Timestamp, TimestampRound, Unit};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenParams {
    /// The URL to redirect to. Blank counts as missing.
    pub long_url: String,
    /// Validity window in minutes; the configured default when `None`.
    pub validity_minutes: Option<i64>,
    /// Caller-chosen short code. A random one is generated when `None`.
    pub custom_code: Option<String>,
}

impl ShortenParams {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Self::default()
        }
    }

    pub fn with_validity_minutes(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }
}

/// Resolves a final, unique short code for a new link and persists it.
///
/// The `exists` check before inserting is only an early exit; the store's
/// uniqueness guarantee on `insert` is what actually prevents two links from
/// sharing a code when requests race.
#[derive(Debug)]
pub struct Allocator<R, G, C> {
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
    settings: ShortenerSettings,
}

impl<R, G, C> Clone for Allocator<R, G, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            clock: Arc::clone(&self.clock),
            settings: self.settings.clone(),
        }
    }
}

impl<R: Repository, G: Generator, C: Clock> Allocator<R, G, C> {
    pub fn new(
        repository: Arc<R>,
        generator: Arc<G>,
        clock: Arc<C>,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            repository,
            generator,
            clock,
            settings,
        }
    }

    /// Creates and stores a new link, returning the persisted record.
    pub async fn allocate(&self, params: ShortenParams) -> Result<LinkRecord> {
        if params.long_url.trim().is_empty() {
            return Err(ShortenerError::MissingField("long_url"));
        }

        let validity = self.validity(params.validity_minutes)?;

        match params.custom_code {
            Some(custom) => self.allocate_custom(custom, params.long_url, validity).await,
            None => self.allocate_generated(params.long_url, validity).await,
        }
    }

    fn validity(&self, minutes: Option<i64>) -> Result<SignedDuration> {
        let minutes = minutes.unwrap_or(self.settings.default_validity_minutes);
        let max = self.settings.max_validity_minutes;
        if minutes <= 0 || minutes > max {
            return Err(ShortenerError::InvalidValidity { got: minutes, max });
        }
        Ok(SignedDuration::from_mins(minutes))
    }

    async fn allocate_custom(
        &self,
        custom: String,
        long_url: String,
        validity: SignedDuration,
    ) -> Result<LinkRecord> {
        let code = ShortCode::new(custom.as_str()).map_err(|_| {
            warn!(code = %custom, "rejected custom shortcode with invalid format");
            ShortenerError::InvalidFormat(custom)
        })?;

        // Expired codes still exist and are never handed out again.
        if self.exists(&code).await? {
            warn!(code = %code, "custom shortcode already taken");
            return Err(ShortenerError::AlreadyExists(code.to_string()));
        }

        let record = self.record(code, long_url, validity)?;
        match self.repository.insert(&record).await {
            Ok(()) => Ok(self.created(record)),
            // Lost a race against a concurrent request for the same code.
            Err(StorageError::Conflict(code)) => {
                warn!(code = %code, "custom shortcode claimed concurrently");
                Err(ShortenerError::AlreadyExists(code))
            }
            Err(e) => Err(store_failure(e)),
        }
    }

    async fn allocate_generated(
        &self,
        long_url: String,
        validity: SignedDuration,
    ) -> Result<LinkRecord> {
        let attempts = self.settings.max_attempts.max(1);

        for attempt in 1..=attempts {
            let code: ShortCode = self.generator.generate().into();

            if self.exists(&code).await? {
                debug!(code = %code, attempt, "generated shortcode collided");
                continue;
            }

            let record = self.record(code, long_url.clone(), validity)?;
            match self.repository.insert(&record).await {
                Ok(()) => return Ok(self.created(record)),
                Err(StorageError::Conflict(code)) => {
                    warn!(code = %code, attempt, "generated shortcode claimed concurrently");
                }
                Err(e) => return Err(store_failure(e)),
            }
        }

        warn!(attempts, "gave up generating an unused shortcode");
        Err(ShortenerError::CodeSpaceExhausted { attempts })
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        self.repository.exists(code).await.map_err(store_failure)
    }

    fn record(
        &self,
        shortcode: ShortCode,
        long_url: String,
        validity: SignedDuration,
    ) -> Result<LinkRecord> {
        let created_at = truncate_to_millis(self.clock.now())?;
        let expires_at = created_at.checked_add(validity).map_err(|_| {
            ShortenerError::InvalidValidity {
                got: validity.as_secs() / 60,
                max: self.settings.max_validity_minutes,
            }
        })?;

        Ok(LinkRecord {
            shortcode,
            long_url,
            created_at,
            expires_at,
        })
    }

    fn created(&self, record: LinkRecord) -> LinkRecord {
        info!(
            code = %record.shortcode,
            expires_at = %record.expires_at,
            "created short link"
        );
        record
    }
}

/// Stores keep instants at millisecond precision; truncating here makes the
/// returned record identical to the persisted one.
fn truncate_to_millis(now: Timestamp) -> Result<Timestamp> {
    now.round(
        TimestampRound::new()
            .smallest(Unit::Millisecond)
            .mode(RoundMode::Trunc),
    )
    .map_err(|e| store_failure(StorageError::InvalidData(format!("invalid clock reading: {e}"))))
}
