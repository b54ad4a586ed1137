// Operation counters shared by every caller of a registry

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct EngineStats {
    pub hotels_created: AtomicUsize,
    pub hotels_removed: AtomicUsize,
    pub rooms_added: AtomicUsize,
    pub rooms_removed: AtomicUsize,
    pub reservations_made: AtomicUsize,
    pub reservations_rejected: AtomicUsize,
    pub reservations_cancelled: AtomicUsize,
    pub discounts_applied: AtomicUsize,
    pub discounts_rejected: AtomicUsize,
}

// Point-in-time copy of the counters
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStatsReport {
    pub hotels_created: usize,
    pub hotels_removed: usize,
    pub rooms_added: usize,
    pub rooms_removed: usize,
    pub reservations_made: usize,
    pub reservations_rejected: usize,
    pub reservations_cancelled: usize,
    pub discounts_applied: usize,
    pub discounts_rejected: usize,
}

impl EngineStats {
    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn add(counter: &AtomicUsize, amount: usize) {
        counter.fetch_add(amount, Ordering::SeqCst);
    }

    pub fn report(&self) -> EngineStatsReport {
        EngineStatsReport {
            hotels_created: self.hotels_created.load(Ordering::SeqCst),
            hotels_removed: self.hotels_removed.load(Ordering::SeqCst),
            rooms_added: self.rooms_added.load(Ordering::SeqCst),
            rooms_removed: self.rooms_removed.load(Ordering::SeqCst),
            reservations_made: self.reservations_made.load(Ordering::SeqCst),
            reservations_rejected: self.reservations_rejected.load(Ordering::SeqCst),
            reservations_cancelled: self.reservations_cancelled.load(Ordering::SeqCst),
            discounts_applied: self.discounts_applied.load(Ordering::SeqCst),
            discounts_rejected: self.discounts_rejected.load(Ordering::SeqCst),
        }
    }
}
