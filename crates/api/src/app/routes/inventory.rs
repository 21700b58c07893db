use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};

use shopfront_core::ItemId;
use shopfront_inventory::InventoryService;

use crate::app::{dto, errors};

fn parse_item_id(id: &str) -> Result<ItemId, axum::response::Response> {
    id.parse().map_err(errors::domain_error_to_response)
}

pub async fn list_inventory(
    Extension(services): Extension<Arc<InventoryService>>,
) -> axum::response::Response {
    let items = dto::inventory_to_views(services.list_inventory());
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn refresh_inventory(
    Extension(services): Extension<Arc<InventoryService>>,
) -> axum::response::Response {
    if let Err(e) = services.refresh() {
        return errors::domain_error_to_response(e);
    }

    let items = dto::inventory_to_views(services.list_inventory());
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item_id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get_item(&item_id) {
        Ok(snapshot) => (StatusCode::OK, Json(dto::ItemView::from(snapshot))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn purchase_item(
    Extension(services): Extension<Arc<InventoryService>>,
    Path(id): Path<String>,
    Query(query): Query<dto::PurchaseQuery>,
) -> axum::response::Response {
    let item_id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let quantity = match query.quantity() {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    match services.purchase_item(&item_id, quantity) {
        Ok(snapshot) => (StatusCode::OK, Json(dto::ItemView::from(snapshot))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
