use serde::{Deserialize, Serialize};

use crate::good::Good;
use crate::id::ProducerId;

/// One claimed unit: a good together with the producer that published it.
///
/// Reservations live in carts between `reserve` and `place_order`; a placed
/// order is the cart's reservation sequence, returned in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub good: Good,
    pub producer: ProducerId,
}

impl Reservation {
    pub fn new(good: Good, producer: ProducerId) -> Self {
        Self { good, producer }
    }
}

impl core::fmt::Display for Reservation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (producer {})", self.good, self.producer)
    }
}
