use std::sync::Arc;
use std::time::Duration;

use shopfront_core::DomainResult;
use shopfront_inventory::{InventoryService, JsonFileSource};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::AppConfig;

/// Build the inventory service from configuration and load the catalog.
///
/// A catalog that cannot be loaded here is fatal to startup.
pub fn build_services(config: &AppConfig) -> DomainResult<Arc<InventoryService>> {
    let source = Arc::new(JsonFileSource::new(config.inventory_path.clone()));
    let service = InventoryService::new(source, config.surge)?;

    tracing::info!(
        path = %config.inventory_path.display(),
        surge_window_ms = config.surge.window.num_milliseconds(),
        surge_threshold = config.surge.threshold,
        "inventory service ready"
    );

    Ok(Arc::new(service))
}

/// Periodically evict expired access events so ledger memory follows the
/// live window. Runs once per TTL.
pub fn spawn_ledger_sweeper(service: Arc<InventoryService>) -> JoinHandle<()> {
    let period = service
        .ledger()
        .ttl()
        .to_std()
        .unwrap_or(Duration::from_secs(60))
        .max(Duration::from_millis(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            service.sweep_expired();
        }
    })
}
