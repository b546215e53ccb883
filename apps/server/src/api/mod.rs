//! HTTP API surface.

mod available;
mod help;
mod quotes;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{middleware, Router};

use crate::access_log;
use crate::config::Config;
use crate::error::ApiError;
use crate::main_lib::AppState;

/// Assemble the full application router.
///
/// Quote routes live under the configured base path; `/metrics` always
/// lives at the root, as scrapers expect.
pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let quote_routes = Router::new()
        .route("/", get(help::get_help))
        .route("/available", get(available::list_models))
        .route("/model/{model}", get(quotes::get_model))
        .route("/model/{model}/{variant}", get(quotes::get_model_variant));

    let base_path = config.base_path.trim_end_matches('/');
    let router = if base_path.is_empty() {
        quote_routes
    } else {
        Router::new().nest(base_path, quote_routes)
    };

    router
        .route("/metrics", get(render_metrics))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log::record,
        ))
        .with_state(state)
}

async fn render_metrics(State(state): State<Arc<AppState>>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

async fn not_found() -> ApiError {
    ApiError::path_not_found()
}
