use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use shopfront_inventory::InventoryService;

pub async fn health(Extension(services): Extension<Arc<InventoryService>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "items": services.catalog_len(),
    }))
}

/// Clear all recorded lookups so every item is back at base price.
pub async fn reset_surge(Extension(services): Extension<Arc<InventoryService>>) -> StatusCode {
    services.reset_surge();
    tracing::info!("surge state reset via api");
    StatusCode::NO_CONTENT
}
