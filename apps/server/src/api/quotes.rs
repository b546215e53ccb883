use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use cryptomotor_core::quotes::Quote;

use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
pub struct QuoteQuery {
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    options: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Quote a model in its default variant.
pub async fn get_model(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<Json<Quote>> {
    quote(state, model, String::new(), query).await
}

/// Quote a specific model variant.
pub async fn get_model_variant(
    State(state): State<Arc<AppState>>,
    Path((model, variant)): Path<(String, String)>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<Json<Quote>> {
    quote(state, model, variant, query).await
}

async fn quote(
    state: Arc<AppState>,
    model: String,
    variant: String,
    query: QuoteQuery,
) -> ApiResult<Json<Quote>> {
    let quote = state
        .quote_service
        .get_quote(&model, &variant, &query.currency, &query.options)
        .await?;
    Ok(Json(quote))
}
