//! Producer registry: quota bookkeeping per registered producer.

use std::collections::HashMap;

use bazaar_core::{ExchangeError, ExchangeResult, ProducerId};

#[derive(Debug)]
struct ProducerRecord {
    quota: u32,
    /// Units published but not yet finalized into an order.
    outstanding: u32,
}

#[derive(Debug, Default)]
pub(crate) struct ProducerRegistry {
    producers: HashMap<ProducerId, ProducerRecord>,
}

impl ProducerRegistry {
    pub(crate) fn register(&mut self, id: ProducerId, quota: u32) {
        self.producers.insert(
            id,
            ProducerRecord {
                quota,
                outstanding: 0,
            },
        );
    }

    /// Take one publishing slot if the producer is below its quota.
    ///
    /// `Ok(false)` means the quota is exhausted right now; the caller backs
    /// off and retries after some finalization frees a slot.
    pub(crate) fn try_acquire_slot(&mut self, id: ProducerId) -> ExchangeResult<bool> {
        let record = self
            .producers
            .get_mut(&id)
            .ok_or(ExchangeError::UnknownProducer(id))?;
        if record.outstanding == record.quota {
            return Ok(false);
        }
        record.outstanding += 1;
        Ok(true)
    }

    /// Free one slot after a unit of this producer was finalized.
    pub(crate) fn release_slot(&mut self, id: ProducerId) {
        if let Some(record) = self.producers.get_mut(&id) {
            record.outstanding = record.outstanding.saturating_sub(1);
        }
    }

    pub(crate) fn outstanding(&self, id: ProducerId) -> ExchangeResult<u32> {
        self.producers
            .get(&id)
            .map(|r| r.outstanding)
            .ok_or(ExchangeError::UnknownProducer(id))
    }

    /// Sum of outstanding counts across all producers.
    pub(crate) fn total_outstanding(&self) -> u64 {
        self.producers.values().map(|r| u64::from(r.outstanding)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_bounded_by_quota() {
        let mut registry = ProducerRegistry::default();
        let id = ProducerId::new(0);
        registry.register(id, 2);

        assert_eq!(registry.try_acquire_slot(id), Ok(true));
        assert_eq!(registry.try_acquire_slot(id), Ok(true));
        assert_eq!(registry.try_acquire_slot(id), Ok(false));

        registry.release_slot(id);
        assert_eq!(registry.try_acquire_slot(id), Ok(true));
        assert_eq!(registry.outstanding(id), Ok(2));
    }

    #[test]
    fn unknown_producer_is_rejected() {
        let mut registry = ProducerRegistry::default();
        let id = ProducerId::new(9);
        assert_eq!(
            registry.try_acquire_slot(id),
            Err(ExchangeError::UnknownProducer(id))
        );
        assert_eq!(
            registry.outstanding(id),
            Err(ExchangeError::UnknownProducer(id))
        );
    }
}
