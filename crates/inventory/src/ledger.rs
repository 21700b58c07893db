//! Access event ledger: the time-windowed index behind surge pricing.
//!
//! Every lookup of an item appends one [`AccessEvent`]. An event is *live*
//! while `now - created_at < ttl`; once that age reaches `ttl` it stops
//! counting, whether or not it has been physically evicted yet.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use shopfront_core::{Clock, EventId, ItemId};

/// One recorded lookup. Never mutated after creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    pub event_id: EventId,
    pub item_id: ItemId,
    pub created_at: DateTime<Utc>,
}

impl AccessEvent {
    fn is_live(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at < ttl
    }
}

/// Multi-valued index: item id → events recorded for that item, oldest first.
pub struct AccessLedger {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    events: RwLock<HashMap<ItemId, VecDeque<AccessEvent>>>,
}

impl core::fmt::Debug for AccessLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessLedger")
            .field("ttl", &self.ttl)
            .field("events", &self.len())
            .finish()
    }
}

impl AccessLedger {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            events: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ItemId, VecDeque<AccessEvent>>> {
        self.events.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ItemId, VecDeque<AccessEvent>>> {
        self.events.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a lookup of `item_id` at the current time.
    ///
    /// Also drops this item's already-expired events from the front of its
    /// queue, so the amortized cost stays O(1).
    pub fn record(&self, item_id: ItemId) -> EventId {
        let event = AccessEvent {
            event_id: EventId::new(),
            item_id,
            created_at: self.clock.now(),
        };

        let mut events = self.write();
        let queue = events.entry(item_id).or_default();
        while queue
            .front()
            .is_some_and(|oldest| !oldest.is_live(event.created_at, self.ttl))
        {
            queue.pop_front();
        }
        queue.push_back(event);

        event.event_id
    }

    /// Number of live events for `item_id` right now.
    pub fn count_live(&self, item_id: &ItemId) -> usize {
        let now = self.clock.now();
        self.read()
            .get(item_id)
            .map(|queue| queue.iter().filter(|e| e.is_live(now, self.ttl)).count())
            .unwrap_or(0)
    }

    /// Evict every expired event. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut events = self.write();

        let before: usize = events.values().map(VecDeque::len).sum();
        events.retain(|_, queue| {
            queue.retain(|e| e.is_live(now, self.ttl));
            !queue.is_empty()
        });
        let after: usize = events.values().map(VecDeque::len).sum();

        before - after
    }

    /// Discard all events unconditionally.
    pub fn reset(&self) {
        self.write().clear();
    }

    /// Events currently retained (live or not yet evicted).
    pub fn len(&self) -> usize {
        self.read().values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
