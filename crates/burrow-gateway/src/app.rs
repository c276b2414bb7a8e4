use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::access_log::access_log;
use crate::handlers::{create_url_handler, health_handler, redirect_handler, stats_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/shorten", post(create_url_handler))
            .route("/stats/{shortcode}", get(stats_handler))
            .route("/{shortcode}", get(redirect_handler))
            .layer(middleware::from_fn_with_state(
                state.request_logger(),
                access_log,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
