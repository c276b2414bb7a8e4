use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_shortener::StatsView;
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected create request body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let record = state.shortener().shorten(request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_url: record.shortcode.to_url(&state.base_url(&headers)),
            shortcode: record.shortcode.to_string(),
        }),
    ))
}

pub async fn redirect_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let long_url = state.shortener().resolve(&shortcode).await?;
    Ok((StatusCode::FOUND, [(LOCATION, long_url)]).into_response())
}

pub async fn stats_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsView>> {
    Ok(Json(state.shortener().stats(&shortcode).await?))
}
