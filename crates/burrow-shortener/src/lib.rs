//! Shortcode allocation and resolution engine.
//!
//! The [`Allocator`] issues unique short codes, the [`Resolver`] turns a code
//! back into its destination while enforcing expiry, and the
//! [`StatsCalculator`] derives lifetime statistics. [`ShortenerService`]
//! bundles the three behind the object-safe [`Shortener`] trait used by the
//! transport layer.

pub mod allocator;
pub mod error;
pub mod resolver;
pub mod service;
pub mod settings;
pub mod shortener;
pub mod stats;

pub use allocator::{Allocator, ShortenParams};
pub use error::{ErrorKind, ShortenerError};
pub use resolver::Resolver;
pub use service::ShortenerService;
pub use settings::ShortenerSettings;
pub use shortener::Shortener;
pub use stats::{StatsCalculator, StatsView};
