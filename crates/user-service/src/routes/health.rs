use axum::Json;
use serde_json::{Value, json};

/// GET /health
pub async fn check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
