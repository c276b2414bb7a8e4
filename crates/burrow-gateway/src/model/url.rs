use burrow_shortener::ShortenParams;
use serde::{Deserialize, Serialize};

/// Body of `POST /shorten`.
///
/// `long_url` is optional here so that its absence is reported as a missing
/// field by the engine rather than as a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub long_url: Option<String>,
    pub validity_in_minutes: Option<i64>,
    pub custom_shortcode: Option<String>,
}

impl From<CreateUrlRequest> for ShortenParams {
    fn from(request: CreateUrlRequest) -> Self {
        ShortenParams {
            long_url: request.long_url.unwrap_or_default(),
            validity_minutes: request.validity_in_minutes,
            custom_code: request.custom_shortcode,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub short_url: String,
    pub shortcode: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
