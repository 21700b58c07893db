use serde::{Deserialize, Serialize};

use shopfront_core::ItemId;

/// Catalog item.
///
/// Identity and base price are fixed at load time; only `quantity` changes
/// (via purchases). `quantity` is internal and never serialized outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(alias = "uuid")]
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base price in the smallest currency unit.
    pub price: u64,
    #[serde(skip_serializing, default)]
    pub quantity: u64,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
        quantity: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// Project this item at `price` (the base price is left untouched).
    pub fn priced_at(&self, price: u64) -> PricedSnapshot {
        PricedSnapshot {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price,
            base_price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Point-in-time view of an item with the surge-adjusted price applied.
///
/// Built fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedSnapshot {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: u64,
    #[serde(skip_serializing)]
    pub base_price: u64,
    #[serde(skip_serializing)]
    pub quantity: u64,
}

impl PricedSnapshot {
    pub fn is_surged(&self) -> bool {
        self.price != self.base_price
    }
}
