//! Where the catalog comes from on refresh.

use std::path::PathBuf;

use serde::Deserialize;

use shopfront_core::{DomainError, DomainResult};

use crate::item::Item;

/// Catalog source abstraction.
///
/// Errors surface as `DomainError::SourceLoad`; implementations do not retry.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> DomainResult<Vec<Item>>;
}

impl<S> CatalogSource for std::sync::Arc<S>
where
    S: CatalogSource + ?Sized,
{
    fn load(&self) -> DomainResult<Vec<Item>> {
        (**self).load()
    }
}

/// On-disk catalog document: `{"items": [...]}`.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    items: Vec<Item>,
}

/// Parse a catalog document from JSON text.
pub fn parse_catalog(json: &str) -> DomainResult<Vec<Item>> {
    let doc: CatalogDocument = serde_json::from_str(json)
        .map_err(|e| DomainError::source_load(format!("malformed catalog: {e}")))?;

    for item in &doc.items {
        if item.name.trim().is_empty() {
            return Err(DomainError::source_load(format!(
                "item {} has an empty name",
                item.id
            )));
        }
    }

    Ok(doc.items)
}

/// JSON file catalog, re-read on every load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileSource {
    fn load(&self) -> DomainResult<Vec<Item>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            DomainError::source_load(format!("{}: {e}", self.path.display()))
        })?;
        parse_catalog(&text)
    }
}

/// Fixed in-memory catalog for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    items: Vec<Item>,
}

impl StaticSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl CatalogSource for StaticSource {
    fn load(&self) -> DomainResult<Vec<Item>> {
        Ok(self.items.clone())
    }
}
