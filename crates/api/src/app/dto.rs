use serde::{Deserialize, Serialize};

use shopfront_core::ItemId;
use shopfront_inventory::{Item, PricedSnapshot};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of a purchase (`?quantity=N`).
///
/// Kept as text so a bad number maps to our own 400 body instead of the
/// extractor's rejection.
#[derive(Debug, Deserialize)]
pub struct PurchaseQuery {
    pub quantity: Option<String>,
}

impl PurchaseQuery {
    pub fn quantity(&self) -> Result<i64, axum::response::Response> {
        let raw = self.quantity.as_deref().unwrap_or("").trim();
        raw.parse::<i64>().map_err(|_| {
            errors::json_error(
                axum::http::StatusCode::BAD_REQUEST,
                "invalid_request",
                format!("quantity must be a whole number, got {raw:?}"),
            )
        })
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// External view of an item. Stock levels are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: u64,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
        }
    }
}

impl From<PricedSnapshot> for ItemView {
    fn from(snapshot: PricedSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            description: snapshot.description,
            price: snapshot.price,
        }
    }
}

pub fn inventory_to_views(items: Vec<Item>) -> Vec<ItemView> {
    items.into_iter().map(ItemView::from).collect()
}
