use crate::allocator::{Allocator, ShortenParams};
use crate::error::Result;
use crate::resolver::Resolver;
use crate::settings::ShortenerSettings;
use crate::shortener::Shortener;
use crate::stats::{StatsCalculator, StatsView};
use async_trait::async_trait;
use burrow_core::{Clock, LinkRecord, Repository, SystemClock};
use burrow_generator::Generator;
use std::sync::Arc;

/// A concrete implementation of the `Shortener` trait.
///
/// This service owns one store handle and shares it between:
/// - the [`Allocator`] (short code generation and persistence)
/// - the [`Resolver`] (redirect lookups with expiry)
/// - the [`StatsCalculator`] (lifetime statistics)
#[derive(Debug)]
pub struct ShortenerService<R, G, C = SystemClock> {
    allocator: Allocator<R, G, C>,
    resolver: Resolver<R, C>,
    stats: StatsCalculator<R, C>,
}

impl<R, G, C> Clone for ShortenerService<R, G, C> {
    fn clone(&self) -> Self {
        Self {
            allocator: self.allocator.clone(),
            resolver: self.resolver.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<R: Repository, G: Generator, C: Clock> ShortenerService<R, G, C> {
    pub fn with_clock(repository: R, generator: G, clock: C, settings: ShortenerSettings) -> Self {
        let repository = Arc::new(repository);
        let clock = Arc::new(clock);

        Self {
            allocator: Allocator::new(
                Arc::clone(&repository),
                Arc::new(generator),
                Arc::clone(&clock),
                settings,
            ),
            resolver: Resolver::new(Arc::clone(&repository), Arc::clone(&clock)),
            stats: StatsCalculator::new(repository, clock),
        }
    }
}

#[async_trait]
impl<R: Repository, G: Generator, C: Clock> Shortener for ShortenerService<R, G, C> {
    async fn shorten(&self, params: ShortenParams) -> Result<LinkRecord> {
        self.allocator.allocate(params).await
    }

    async fn resolve(&self, code: &str) -> Result<String> {
        self.resolver.resolve(code).await
    }

    async fn stats(&self, code: &str) -> Result<StatsView> {
        self.stats.stats(code).await
    }
}
