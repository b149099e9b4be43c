//! `bazaar-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no locking, no IO).

pub mod error;
pub mod good;
pub mod id;
pub mod reservation;

pub use error::{ExchangeError, ExchangeResult};
pub use good::Good;
pub use id::{CartId, ProducerId};
pub use reservation::Reservation;
