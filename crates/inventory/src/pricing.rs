//! Surge pricing policy.

/// Surcharge applied under surge, in percent.
pub const SURGE_PERCENT: u64 = 10;

/// Flat-step surge policy: one global threshold, one fixed multiplier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurgePolicy {
    threshold: usize,
}

impl SurgePolicy {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn is_surging(&self, live_count: usize) -> bool {
        live_count > self.threshold
    }

    pub fn adjust(&self, base_price: u64, live_count: usize) -> u64 {
        adjust(base_price, live_count, self.threshold)
    }
}

/// Price for `base_price` given `live_count` recent lookups.
///
/// Above `threshold` the price is `base_price * 1.10`, rounded half-up to the
/// nearest unit. Integer arithmetic keeps the rounding exact; prices whose
/// surcharge would overflow `u64` are clamped to `u64::MAX`.
pub fn adjust(base_price: u64, live_count: usize, threshold: usize) -> u64 {
    if live_count > threshold {
        let scaled = (u128::from(base_price) * u128::from(100 + SURGE_PERCENT) + 50) / 100;
        u64::try_from(scaled).unwrap_or(u64::MAX)
    } else {
        base_price
    }
}
