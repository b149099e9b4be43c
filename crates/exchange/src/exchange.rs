//! The exchange: synchronized operations over the three stores.
//!
//! One state mutex linearizes every inventory, quota, and cart mutation; id
//! allocation runs under its own counters so registration and cart creation
//! never contend with the publish/reserve hot path; the order-report lock is
//! a fourth, unrelated mutex for output serialization only.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info};

use bazaar_core::{CartId, ExchangeError, ExchangeResult, Good, ProducerId, Reservation};
use bazaar_events::{EventRecord, EventSink, ExchangeEvent};

use crate::carts::CartStore;
use crate::ledger::{InventoryLedger, StockLevel};
use crate::registry::ProducerRegistry;

#[derive(Debug, Default)]
struct ExchangeState {
    producers: ProducerRegistry,
    inventory: InventoryLedger,
    carts: CartStore,
}

/// The shared exchange. One instance per process, shared behind an `Arc`.
///
/// All operations take `&self` and are safe to call from any number of
/// threads. `publish` and `reserve` never block beyond their critical
/// section: contention is reported as `Ok(false)` and retried by the caller.
pub struct Exchange {
    queue_size_per_producer: u32,
    state: Mutex<ExchangeState>,
    next_producer_id: Mutex<u64>,
    next_cart_id: Mutex<u64>,
    order_report: Mutex<()>,
    sink: Option<Arc<dyn EventSink>>,
}

impl core::fmt::Debug for Exchange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Exchange")
            .field("queue_size_per_producer", &self.queue_size_per_producer)
            .finish_non_exhaustive()
    }
}

impl Exchange {
    /// Create an exchange applying `queue_size_per_producer` as the quota of
    /// every producer registered thereafter.
    pub fn new(queue_size_per_producer: u32) -> ExchangeResult<Self> {
        if queue_size_per_producer == 0 {
            return Err(ExchangeError::validation(
                "queue_size_per_producer must be positive",
            ));
        }
        Ok(Self {
            queue_size_per_producer,
            state: Mutex::new(ExchangeState::default()),
            next_producer_id: Mutex::new(0),
            next_cart_id: Mutex::new(0),
            order_report: Mutex::new(()),
            sink: None,
        })
    }

    /// Attach a sink that receives one timestamped record per operation.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn queue_size_per_producer(&self) -> u32 {
        self.queue_size_per_producer
    }

    /// Register a new producer and hand out its id.
    ///
    /// Ids are sequential from 0 and never reused.
    pub fn register_producer(&self) -> ProducerId {
        let id = {
            let mut next = self.next_producer_id.lock();
            let id = ProducerId::new(*next);
            *next += 1;
            id
        };
        self.state
            .lock()
            .producers
            .register(id, self.queue_size_per_producer);
        info!(producer = %id, "producer registered");
        self.emit(ExchangeEvent::ProducerRegistered { producer: id });
        id
    }

    /// Publish one unit of `good` on behalf of `producer`.
    ///
    /// `Ok(false)` when the producer's quota is exhausted; the caller backs
    /// off and retries once some of its units are finalized.
    pub fn publish(&self, producer: ProducerId, good: &Good) -> ExchangeResult<bool> {
        let accepted = {
            let mut state = self.state.lock();
            let state = &mut *state;
            if state.producers.try_acquire_slot(producer)? {
                state.inventory.record_unit(good, producer);
                true
            } else {
                false
            }
        };
        debug!(producer = %producer, good = %good, accepted, "publish");
        self.emit(ExchangeEvent::GoodPublished {
            producer,
            good: good.clone(),
            accepted,
        });
        Ok(accepted)
    }

    /// Open a new, empty cart and hand out its id.
    pub fn new_cart(&self) -> CartId {
        let id = {
            let mut next = self.next_cart_id.lock();
            let id = CartId::new(*next);
            *next += 1;
            id
        };
        self.state.lock().carts.open(id);
        debug!(cart = %id, "cart opened");
        self.emit(ExchangeEvent::CartOpened { cart: id });
        id
    }

    /// Reserve one unit of `good` into `cart`.
    ///
    /// Claims the earliest-published available unit. `Ok(false)` when no
    /// unit is available right now; stock may appear through a later publish
    /// or another cart's unreserve, so the caller retries.
    pub fn reserve(&self, cart: CartId, good: &Good) -> ExchangeResult<bool> {
        let accepted = {
            let mut state = self.state.lock();
            let state = &mut *state;
            if !state.carts.contains(cart) {
                return Err(ExchangeError::UnknownCart(cart));
            }
            match state.inventory.claim_unit(good) {
                Some(owner) => {
                    state
                        .carts
                        .push_item(cart, Reservation::new(good.clone(), owner))?;
                    true
                }
                None => false,
            }
        };
        debug!(cart = %cart, good = %good, accepted, "reserve");
        self.emit(ExchangeEvent::GoodReserved {
            cart,
            good: good.clone(),
            accepted,
        });
        Ok(accepted)
    }

    /// Return the first reserved unit of `good` from `cart` to the pool.
    ///
    /// No-op when the cart holds no such good. The returned unit's owner is
    /// appended at the back of the good's FIFO, not restored to its original
    /// position.
    pub fn unreserve(&self, cart: CartId, good: &Good) -> ExchangeResult<()> {
        {
            let mut state = self.state.lock();
            let state = &mut *state;
            if let Some(item) = state.carts.remove_first(cart, good)? {
                state.inventory.release_unit(good, item.producer);
            }
        }
        debug!(cart = %cart, good = %good, "unreserve");
        self.emit(ExchangeEvent::GoodUnreserved {
            cart,
            good: good.clone(),
        });
        Ok(())
    }

    /// Finalize `cart` into an order.
    ///
    /// Every reserved unit leaves the exchange permanently and frees one
    /// slot of its producer's quota. An empty cart yields an empty order and
    /// no state change. A finalized cart id must not be finalized again.
    pub fn place_order(&self, cart: CartId) -> ExchangeResult<Vec<Reservation>> {
        let lines = {
            let mut state = self.state.lock();
            let state = &mut *state;
            let lines = state.carts.finalize(cart)?;
            for line in &lines {
                state.inventory.consume_unit(&line.good);
                state.producers.release_slot(line.producer);
            }
            lines
        };
        info!(cart = %cart, lines = lines.len(), "order placed");
        self.emit(ExchangeEvent::OrderPlaced {
            cart,
            lines: lines.clone(),
        });
        Ok(lines)
    }

    /// Acquire the output-serialization lock.
    ///
    /// Callers hold the returned guard around externally observable
    /// reporting of a placed order so concurrent consumers do not interleave
    /// their output. Independent of all inventory locking.
    pub fn order_report_lock(&self) -> MutexGuard<'_, ()> {
        self.order_report.lock()
    }

    /// Current stock reading for `good`, if it was ever published.
    pub fn stock(&self, good: &Good) -> Option<StockLevel> {
        self.state.lock().inventory.stock(good)
    }

    /// Current outstanding count of `producer`.
    pub fn outstanding(&self, producer: ProducerId) -> ExchangeResult<u32> {
        self.state.lock().producers.outstanding(producer)
    }

    /// Total listed units across all goods.
    pub fn total_listed(&self) -> u64 {
        self.state.lock().inventory.total_quantity()
    }

    /// Total outstanding units across all producers.
    pub fn total_outstanding(&self) -> u64 {
        self.state.lock().producers.total_outstanding()
    }

    fn emit(&self, event: ExchangeEvent) {
        if let Some(sink) = &self.sink {
            sink.append(EventRecord::new(event));
        }
    }
}
