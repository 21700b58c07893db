use axum::{
    Router,
    routing::{get, post},
};

pub mod inventory;
pub mod system;

/// Read-only endpoints, open to anyone.
pub fn public_router() -> Router {
    Router::new()
        .route("/inventory", get(inventory::list_inventory))
        .route("/item/:id", get(inventory::get_item))
}

/// Endpoints that change state; wrapped in the auth layer by the caller.
pub fn protected_router() -> Router {
    Router::new()
        .route("/inventory", post(inventory::refresh_inventory))
        .route("/item/:id", post(inventory::purchase_item))
        .route("/surge/reset", post(system::reset_surge))
}
