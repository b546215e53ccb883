use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use cryptomotor_core::catalog::ModelSummary;

use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AvailableResponse {
    pub models: Vec<ModelSummary>,
}

/// List every configured model with its known options and variants.
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<AvailableResponse> {
    Json(AvailableResponse {
        models: state.quote_service.available(),
    })
}
