//! Inventory service: the catalog, ledger and pricing policy wired together.

use std::sync::Arc;

use chrono::Duration;

use shopfront_core::{Clock, DomainError, DomainResult, ItemId, SystemClock};

use crate::catalog::CatalogStore;
use crate::item::{Item, PricedSnapshot};
use crate::ledger::AccessLedger;
use crate::pricing::SurgePolicy;
use crate::source::CatalogSource;

/// Surge tunables, fixed for the life of the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurgeSettings {
    /// How long a lookup keeps counting toward surge pressure.
    pub window: Duration,
    /// Live lookups above this count trigger the surcharge.
    pub threshold: usize,
}

impl Default for SurgeSettings {
    fn default() -> Self {
        Self {
            window: Duration::hours(1),
            threshold: 10,
        }
    }
}

/// Long-lived inventory state. Build once, share via `Arc`.
pub struct InventoryService {
    source: Arc<dyn CatalogSource>,
    catalog: CatalogStore,
    ledger: AccessLedger,
    policy: SurgePolicy,
}

impl core::fmt::Debug for InventoryService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryService")
            .field("catalog", &self.catalog)
            .field("ledger", &self.ledger)
            .field("policy", &self.policy)
            .finish()
    }
}

impl InventoryService {
    /// Build the service and perform the initial catalog load.
    pub fn new(source: Arc<dyn CatalogSource>, settings: SurgeSettings) -> DomainResult<Self> {
        Self::with_clock(source, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn CatalogSource>,
        settings: SurgeSettings,
        clock: Arc<dyn Clock>,
    ) -> DomainResult<Self> {
        let service = Self {
            source,
            catalog: CatalogStore::new(),
            ledger: AccessLedger::new(settings.window, clock),
            policy: SurgePolicy::new(settings.threshold),
        };
        service.refresh()?;
        Ok(service)
    }

    /// Number of items currently in the catalog.
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn ledger(&self) -> &AccessLedger {
        &self.ledger
    }

    /// Reload the catalog from the source.
    ///
    /// The ledger is untouched. On failure the current catalog stays in place.
    pub fn refresh(&self) -> DomainResult<usize> {
        let items = self.source.load().inspect_err(|e| {
            tracing::error!(error = %e, "catalog refresh failed; keeping current catalog");
        })?;

        let count = self.catalog.load(items);
        if self.catalog.is_empty() {
            tracing::warn!("catalog refreshed with no items");
        } else {
            tracing::info!(items = count, "catalog refreshed");
        }
        Ok(count)
    }

    pub fn list_inventory(&self) -> Vec<Item> {
        self.catalog.list()
    }

    /// Look up an item, counting this lookup toward its surge window.
    pub fn get_item(&self, item_id: &ItemId) -> DomainResult<PricedSnapshot> {
        let item = self.catalog.get(item_id).ok_or(DomainError::NotFound)?;

        self.ledger.record(item.id);
        let live = self.ledger.count_live(&item.id);

        Ok(self.price(&item, live))
    }

    /// Buy `quantity` units. Priced from the existing surge state; a purchase
    /// does not itself count as a lookup.
    pub fn purchase_item(&self, item_id: &ItemId, quantity: i64) -> DomainResult<PricedSnapshot> {
        if self.catalog.get(item_id).is_none() {
            return Err(DomainError::NotFound);
        }

        let quantity = u64::try_from(quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| {
                DomainError::invalid_request(format!("quantity must be at least 1, got {quantity}"))
            })?;

        let item = match self.catalog.try_decrement(item_id, quantity) {
            Ok(item) => item,
            Err(e) => {
                tracing::info!(item_id = %item_id, quantity, error = %e, "purchase rejected");
                return Err(e);
            }
        };

        let live = self.ledger.count_live(&item.id);
        let snapshot = self.price(&item, live);
        tracing::info!(
            item_id = %item.id,
            quantity,
            remaining = item.quantity,
            price = snapshot.price,
            surged = snapshot.is_surged(),
            "purchase completed"
        );
        Ok(snapshot)
    }

    /// Forget every recorded lookup, returning all prices to base.
    pub fn reset_surge(&self) {
        self.ledger.reset();
        tracing::debug!("surge ledger reset");
    }

    /// Evict expired lookups. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let evicted = self.ledger.sweep();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.ledger.len(), "swept expired access events");
        }
        evicted
    }

    fn price(&self, item: &Item, live: usize) -> PricedSnapshot {
        let price = self.policy.adjust(item.price, live);
        if self.policy.is_surging(live) {
            tracing::debug!(item_id = %item.id, live, base = item.price, price, "surge pricing applied");
        }
        item.priced_at(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use shopfront_core::ManualClock;

    use crate::source::StaticSource;

    fn widget(price: u64, quantity: u64) -> Item {
        Item::new(ItemId::new(), "Widget", "A widget", price, quantity)
    }

    fn service_with(items: Vec<Item>) -> (InventoryService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_epoch());
        let settings = SurgeSettings {
            window: Duration::milliseconds(10_000),
            threshold: 3,
        };
        let service =
            InventoryService::with_clock(Arc::new(StaticSource::new(items)), settings, clock.clone())
                .unwrap();
        (service, clock)
    }

    /// Source whose next load result can be swapped by the test.
    struct SwitchableSource {
        next: Mutex<DomainResult<Vec<Item>>>,
    }

    impl CatalogSource for SwitchableSource {
        fn load(&self) -> DomainResult<Vec<Item>> {
            self.next.lock().unwrap().clone()
        }
    }

    #[test]
    fn fourth_lookup_within_window_surges_then_relaxes() {
        let item = widget(100, 5);
        let (service, clock) = service_with(vec![item.clone()]);

        let prices: Vec<u64> = (0..4)
            .map(|_| service.get_item(&item.id).unwrap().price)
            .collect();
        assert_eq!(prices, vec![100, 100, 100, 110]);

        clock.advance(Duration::milliseconds(10_000));
        assert_eq!(service.get_item(&item.id).unwrap().price, 100);
    }

    #[test]
    fn surge_stays_flat_far_above_threshold() {
        let item = widget(100, 5);
        let (service, _clock) = service_with(vec![item.clone()]);

        for _ in 0..4 {
            service.get_item(&item.id).unwrap();
        }
        for _ in 0..20 {
            assert_eq!(service.get_item(&item.id).unwrap().price, 110);
        }
    }

    #[test]
    fn surge_is_per_item() {
        let hot = widget(100, 5);
        let cold = widget(200, 5);
        let (service, _clock) = service_with(vec![hot.clone(), cold.clone()]);

        for _ in 0..5 {
            service.get_item(&hot.id).unwrap();
        }
        assert_eq!(service.get_item(&cold.id).unwrap().price, 200);
    }

    #[test]
    fn get_item_reports_current_quantity() {
        let item = widget(100, 5);
        let (service, _clock) = service_with(vec![item.clone()]);

        service.purchase_item(&item.id, 2).unwrap();
        assert_eq!(service.get_item(&item.id).unwrap().quantity, 3);
    }

    #[test]
    fn unknown_item_is_not_found() {
        let (service, _clock) = service_with(vec![widget(100, 5)]);
        let unknown = ItemId::new();

        assert_eq!(service.get_item(&unknown), Err(DomainError::NotFound));
        assert_eq!(service.purchase_item(&unknown, 1), Err(DomainError::NotFound));
        assert_eq!(service.ledger().count_live(&unknown), 0);
    }

    #[test]
    fn purchase_sells_out_then_rejects() {
        let item = widget(100, 2);
        let (service, _clock) = service_with(vec![item.clone()]);

        let bought = service.purchase_item(&item.id, 2).unwrap();
        assert_eq!(bought.quantity, 0);
        assert_eq!(bought.price, 100);

        assert_eq!(
            service.purchase_item(&item.id, 1),
            Err(DomainError::insufficient_stock(1, 0))
        );
    }

    #[test]
    fn oversized_purchase_leaves_stock_untouched() {
        let item = widget(100, 2);
        let (service, _clock) = service_with(vec![item.clone()]);

        assert!(matches!(
            service.purchase_item(&item.id, 3),
            Err(DomainError::InsufficientStock { .. })
        ));
        assert_eq!(service.list_inventory()[0].quantity, 2);
    }

    #[test]
    fn non_positive_quantity_is_invalid_request() {
        let item = widget(100, 2);
        let (service, _clock) = service_with(vec![item.clone()]);

        assert!(matches!(
            service.purchase_item(&item.id, 0),
            Err(DomainError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.purchase_item(&item.id, -4),
            Err(DomainError::InvalidRequest(_))
        ));
        assert_eq!(service.list_inventory()[0].quantity, 2);
    }

    #[test]
    fn purchases_do_not_inflate_surge() {
        let item = widget(100, 50);
        let (service, _clock) = service_with(vec![item.clone()]);

        for _ in 0..10 {
            service.purchase_item(&item.id, 1).unwrap();
        }
        assert_eq!(service.ledger().count_live(&item.id), 0);
        assert_eq!(service.get_item(&item.id).unwrap().price, 100);
    }

    #[test]
    fn purchase_inherits_surge_from_recent_lookups() {
        let item = widget(100, 5);
        let (service, _clock) = service_with(vec![item.clone()]);

        for _ in 0..4 {
            service.get_item(&item.id).unwrap();
        }
        let bought = service.purchase_item(&item.id, 1).unwrap();
        assert_eq!(bought.price, 110);
        assert_eq!(service.ledger().count_live(&item.id), 4);
    }

    #[test]
    fn reset_surge_returns_price_to_base() {
        let item = widget(100, 5);
        let (service, _clock) = service_with(vec![item.clone()]);

        for _ in 0..4 {
            service.get_item(&item.id).unwrap();
        }
        service.reset_surge();
        assert_eq!(service.ledger().count_live(&item.id), 0);
        assert_eq!(service.get_item(&item.id).unwrap().price, 100);
    }

    #[test]
    fn sweep_expired_shrinks_ledger() {
        let item = widget(100, 5);
        let (service, clock) = service_with(vec![item.clone()]);

        service.get_item(&item.id).unwrap();
        service.get_item(&item.id).unwrap();
        clock.advance(Duration::milliseconds(10_000));

        assert_eq!(service.sweep_expired(), 2);
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn refresh_restores_stock_and_keeps_surge_state() {
        let item = widget(100, 5);
        let (service, _clock) = service_with(vec![item.clone()]);

        for _ in 0..4 {
            service.get_item(&item.id).unwrap();
        }
        service.purchase_item(&item.id, 5).unwrap();

        assert_eq!(service.refresh().unwrap(), 1);
        assert_eq!(service.catalog_len(), 1);
        assert_eq!(service.list_inventory()[0].quantity, 5);
        assert_eq!(service.ledger().count_live(&item.id), 4);
    }

    #[test]
    fn failed_refresh_keeps_previous_catalog() {
        let item = widget(100, 5);
        let source = Arc::new(SwitchableSource {
            next: Mutex::new(Ok(vec![item.clone()])),
        });
        let service = InventoryService::with_clock(
            source.clone(),
            SurgeSettings::default(),
            Arc::new(ManualClock::at_epoch()),
        )
        .unwrap();

        *source.next.lock().unwrap() = Err(DomainError::source_load("disk on fire"));
        assert!(matches!(service.refresh(), Err(DomainError::SourceLoad(_))));
        assert_eq!(service.list_inventory(), vec![item]);
    }

    #[test]
    fn initial_load_failure_is_surfaced() {
        let source = Arc::new(SwitchableSource {
            next: Mutex::new(Err(DomainError::source_load("missing"))),
        });
        let result = InventoryService::new(source, SurgeSettings::default());
        assert!(matches!(result, Err(DomainError::SourceLoad(_))));
    }

    #[test]
    fn concurrent_purchases_through_service_never_oversell() {
        let item = widget(100, 30);
        let (service, _clock) = service_with(vec![item.clone()]);

        let (service, id) = (&service, item.id);
        let sold: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..6)
                .map(|_| {
                    s.spawn(move || {
                        (0..10)
                            .filter(|_| service.purchase_item(&id, 1).is_ok())
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(sold, 30);
        assert_eq!(service.list_inventory()[0].quantity, 0);
    }

    /// Source that hands out two catalogs in turn.
    struct AlternatingSource {
        catalogs: [Vec<Item>; 2],
        loads: AtomicUsize,
    }

    impl CatalogSource for AlternatingSource {
        fn load(&self) -> DomainResult<Vec<Item>> {
            let n = self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.catalogs[n % 2].clone())
        }
    }

    #[test]
    fn readers_never_observe_a_half_applied_refresh() {
        let mut first: Vec<Item> = (0..3).map(|i| widget(100 + i, 5)).collect();
        let mut second: Vec<Item> = (0..2).map(|i| widget(200 + i, 9)).collect();
        first.sort_by_key(|item| item.id);
        second.sort_by_key(|item| item.id);

        let source = Arc::new(AlternatingSource {
            catalogs: [first.clone(), second.clone()],
            loads: AtomicUsize::new(0),
        });
        let service = InventoryService::with_clock(
            source,
            SurgeSettings::default(),
            Arc::new(ManualClock::at_epoch()),
        )
        .unwrap();
        assert_eq!(service.catalog_len(), 3);

        let (service, first, second) = (&service, &first, &second);
        std::thread::scope(|s| {
            s.spawn(move || {
                for _ in 0..200 {
                    service.refresh().unwrap();
                }
            });

            let readers: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(move || {
                        for _ in 0..500 {
                            let seen = service.list_inventory();
                            assert!(seen == *first || seen == *second, "mixed catalog: {seen:?}");
                        }
                    })
                })
                .collect();
            for reader in readers {
                reader.join().unwrap();
            }
        });

        // 1 initial load + 200 refreshes ends on the first catalog.
        assert_eq!(service.list_inventory(), *first);
        assert_eq!(service.catalog_len(), 3);
    }
}
