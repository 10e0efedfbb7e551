use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use relaychat_types::routes;
use tower_http::timeout::TimeoutLayer;

use crate::handlers;
use crate::llm::ProviderRegistry;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub providers: ProviderRegistry,
}

pub fn build_app(state: AppState, request_timeout_secs: Option<u64>) -> Router {
    let router = Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .route(routes::OPENAI, post(handlers::relay_openai))
        .route(routes::DEEPSEEK, post(handlers::relay_deepseek))
        .route(routes::GEMINI, post(handlers::relay_gemini))
        .with_state(state);

    match request_timeout_secs {
        Some(secs) => router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(secs),
        )),
        None => router,
    }
}
