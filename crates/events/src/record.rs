use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_core::{CartId, Good, ProducerId, Reservation};

/// One exchange operation, as observed at the exchange boundary.
///
/// Contention outcomes are part of the record (`accepted: false`), not a
/// separate failure stream: a rejected publish or reserve is an ordinary,
/// expected event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    ProducerRegistered {
        producer: ProducerId,
    },
    GoodPublished {
        producer: ProducerId,
        good: Good,
        accepted: bool,
    },
    CartOpened {
        cart: CartId,
    },
    GoodReserved {
        cart: CartId,
        good: Good,
        accepted: bool,
    },
    GoodUnreserved {
        cart: CartId,
        good: Good,
    },
    OrderPlaced {
        cart: CartId,
        lines: Vec<Reservation>,
    },
}

impl ExchangeEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ExchangeEvent::ProducerRegistered { .. } => "exchange.producer.registered",
            ExchangeEvent::GoodPublished { .. } => "exchange.good.published",
            ExchangeEvent::CartOpened { .. } => "exchange.cart.opened",
            ExchangeEvent::GoodReserved { .. } => "exchange.good.reserved",
            ExchangeEvent::GoodUnreserved { .. } => "exchange.good.unreserved",
            ExchangeEvent::OrderPlaced { .. } => "exchange.order.placed",
        }
    }
}

/// Envelope for an operation event: identity + timestamp + payload.
///
/// Records are append-only; `event_id` is UUIDv7, so records sort by creation
/// time even when collected from multiple threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    event_id: Uuid,
    occurred_at: DateTime<Utc>,
    payload: ExchangeEvent,
}

impl EventRecord {
    /// Stamp a new record for `payload` with the current time.
    pub fn new(payload: ExchangeEvent) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }

    pub fn payload(&self) -> &ExchangeEvent {
        &self.payload
    }

    pub fn into_payload(self) -> ExchangeEvent {
        self.payload
    }
}
