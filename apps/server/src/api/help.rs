use axum::Json;
use serde_json::{json, Value};

/// Static help payload served at the base path.
pub async fn get_help() -> Json<Value> {
    Json(json!({
        "Status": "200",
        "Message": "See https://github.com/cryptomotor/cryptomotor for documentation",
    }))
}
