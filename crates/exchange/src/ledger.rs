//! Per-good stock ledger.
//!
//! Tracks, for every good ever published, the total listed quantity, the
//! currently claimable quantity, and the FIFO of producers whose units are
//! still unclaimed. Entries are created lazily on first publish and kept for
//! the process lifetime; a later publish of the same good reuses the entry.

use std::collections::{HashMap, VecDeque};

use bazaar_core::{Good, ProducerId};

/// Point-in-time stock reading for one good.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockLevel {
    /// Units currently listed and not yet finalized into an order.
    pub quantity: u64,
    /// Units currently unreserved and claimable. Always `<= quantity`;
    /// the difference is sitting in carts.
    pub available: u64,
}

#[derive(Debug, Default)]
struct StockEntry {
    quantity: u64,
    available: u64,
    owners: VecDeque<ProducerId>,
}

#[derive(Debug, Default)]
pub(crate) struct InventoryLedger {
    entries: HashMap<Good, StockEntry>,
}

impl InventoryLedger {
    /// List one freshly published unit owned by `producer`.
    pub(crate) fn record_unit(&mut self, good: &Good, producer: ProducerId) {
        let entry = self.entries.entry(good.clone()).or_default();
        entry.quantity += 1;
        entry.available += 1;
        entry.owners.push_back(producer);
    }

    /// Claim the earliest-published unclaimed unit of `good`.
    ///
    /// Returns the owning producer, or `None` when the good has never been
    /// published or nothing is currently available.
    pub(crate) fn claim_unit(&mut self, good: &Good) -> Option<ProducerId> {
        let entry = self.entries.get_mut(good)?;
        let producer = entry.owners.pop_front()?;
        entry.available -= 1;
        Some(producer)
    }

    /// Return a previously claimed unit to the pool.
    ///
    /// The owner goes to the *back* of the FIFO, not to its original
    /// position: claim order is first-published-first among units available
    /// at claim time, and a released unit counts as newly available.
    pub(crate) fn release_unit(&mut self, good: &Good, producer: ProducerId) {
        if let Some(entry) = self.entries.get_mut(good) {
            entry.available += 1;
            entry.owners.push_back(producer);
        }
    }

    /// Remove one claimed unit of `good` from the exchange for good.
    ///
    /// The unit was reserved out of this entry, so `quantity` is at least 1
    /// and strictly greater than `available`.
    pub(crate) fn consume_unit(&mut self, good: &Good) {
        if let Some(entry) = self.entries.get_mut(good) {
            entry.quantity = entry.quantity.saturating_sub(1);
        }
    }

    pub(crate) fn stock(&self, good: &Good) -> Option<StockLevel> {
        self.entries.get(good).map(|e| StockLevel {
            quantity: e.quantity,
            available: e.available,
        })
    }

    /// Total listed units across all goods.
    pub(crate) fn total_quantity(&self) -> u64 {
        self.entries.values().map(|e| e.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea() -> Good {
        Good::from("tea")
    }

    #[test]
    fn claims_follow_publish_order() {
        let mut ledger = InventoryLedger::default();
        ledger.record_unit(&tea(), ProducerId::new(0));
        ledger.record_unit(&tea(), ProducerId::new(1));
        ledger.record_unit(&tea(), ProducerId::new(2));

        assert_eq!(ledger.claim_unit(&tea()), Some(ProducerId::new(0)));
        assert_eq!(ledger.claim_unit(&tea()), Some(ProducerId::new(1)));
        assert_eq!(ledger.claim_unit(&tea()), Some(ProducerId::new(2)));
        assert_eq!(ledger.claim_unit(&tea()), None);
    }

    #[test]
    fn claim_on_unknown_good_is_none() {
        let mut ledger = InventoryLedger::default();
        assert_eq!(ledger.claim_unit(&tea()), None);
        assert_eq!(ledger.stock(&tea()), None);
    }

    #[test]
    fn release_reappends_owner_at_tail() {
        let mut ledger = InventoryLedger::default();
        ledger.record_unit(&tea(), ProducerId::new(0));
        ledger.record_unit(&tea(), ProducerId::new(1));

        let first = ledger.claim_unit(&tea()).unwrap();
        assert_eq!(first, ProducerId::new(0));
        ledger.release_unit(&tea(), first);

        // Producer 1 was already queued ahead of the returned unit.
        assert_eq!(ledger.claim_unit(&tea()), Some(ProducerId::new(1)));
        assert_eq!(ledger.claim_unit(&tea()), Some(ProducerId::new(0)));
    }

    #[test]
    fn consume_removes_listed_quantity_only() {
        let mut ledger = InventoryLedger::default();
        ledger.record_unit(&tea(), ProducerId::new(0));
        ledger.record_unit(&tea(), ProducerId::new(0));
        ledger.claim_unit(&tea()).unwrap();

        ledger.consume_unit(&tea());
        let stock = ledger.stock(&tea()).unwrap();
        assert_eq!(stock.quantity, 1);
        assert_eq!(stock.available, 1);
    }

    #[test]
    fn owners_fifo_length_tracks_available() {
        let mut ledger = InventoryLedger::default();
        for i in 0..4 {
            ledger.record_unit(&tea(), ProducerId::new(i));
        }
        ledger.claim_unit(&tea()).unwrap();
        let returned = ledger.claim_unit(&tea()).unwrap();
        ledger.release_unit(&tea(), returned);

        let entry = ledger.entries.get(&tea()).unwrap();
        assert_eq!(entry.owners.len() as u64, entry.available);
        assert_eq!(entry.available, 3);
        assert_eq!(entry.quantity, 4);
    }

    #[test]
    fn entry_survives_reaching_zero_quantity() {
        let mut ledger = InventoryLedger::default();
        ledger.record_unit(&tea(), ProducerId::new(0));
        ledger.claim_unit(&tea()).unwrap();
        ledger.consume_unit(&tea());

        assert_eq!(
            ledger.stock(&tea()),
            Some(StockLevel {
                quantity: 0,
                available: 0
            })
        );

        ledger.record_unit(&tea(), ProducerId::new(1));
        assert_eq!(ledger.claim_unit(&tea()), Some(ProducerId::new(1)));
    }
}
