use std::sync::Arc;

use axum::http::header::HOST;
use axum::http::HeaderMap;
use burrow_shortener::Shortener;

use crate::access_log::RequestLogger;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: Option<String>,
    request_logger: Arc<dyn RequestLogger>,
}

impl AppState {
    pub fn new(
        shortener: Arc<dyn Shortener>,
        public_base_url: Option<String>,
        request_logger: Arc<dyn RequestLogger>,
    ) -> Self {
        Self {
            shortener,
            base_url: public_base_url,
            request_logger,
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn request_logger(&self) -> Arc<dyn RequestLogger> {
        Arc::clone(&self.request_logger)
    }

    /// The base short URLs are built on: the configured public URL, or
    /// `http://<Host>` of the current request.
    pub fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.clone();
        }

        let host = headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost");
        format!("http://{host}")
    }
}
