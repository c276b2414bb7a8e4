//! HTTP gateway for the Burrow URL shortener.
//!
//! Maps the JSON/HTTP surface onto a [`burrow_shortener::Shortener`] and
//! reports every exchange to a [`RequestLogger`].

pub mod access_log;
pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use access_log::{AccessLogEntry, FileRequestLogger, RequestLogger, TracingRequestLogger};
pub use app::App;
pub use state::AppState;
