//! Inventory domain module with surge pricing.
//!
//! This crate contains the catalog, the access ledger that tracks recent
//! lookups, and the pricing policy, implemented as in-process state and pure
//! functions (no HTTP, no transport concerns).

pub mod catalog;
pub mod item;
pub mod ledger;
pub mod pricing;
pub mod service;
pub mod source;

pub use catalog::CatalogStore;
pub use item::{Item, PricedSnapshot};
pub use ledger::{AccessEvent, AccessLedger};
pub use pricing::SurgePolicy;
pub use service::{InventoryService, SurgeSettings};
pub use source::{CatalogSource, JsonFileSource, StaticSource, parse_catalog};
