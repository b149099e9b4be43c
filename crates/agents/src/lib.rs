//! Agent work loops driving the exchange.
//!
//! Agents are plain threads: one per producer, one per consumer, all sharing
//! one exchange. They honor the exchange's non-blocking contract: on
//! `Ok(false)` they sleep a configured interval and try again.

pub mod consumer;
pub mod producer;

pub use consumer::{CartAction, CartStep, ConsumerAgent, ConsumerHandle, ShoppingPlan};
pub use producer::{Batch, ProducerAgent, ProducerHandle, ProductionPlan};
