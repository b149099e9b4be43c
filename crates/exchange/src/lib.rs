//! `bazaar-exchange` — the shared exchange at the center of the marketplace.
//!
//! Producers publish units of goods into a shared inventory, bounded by a
//! per-producer quota; consumers reserve units into carts and finalize them
//! as orders. All mutation passes through the [`Exchange`]'s synchronized
//! operations; the backing stores are never exposed.
//!
//! Contention (quota exhausted, no stock) is signaled with `Ok(false)` and is
//! the caller's cue to back off and retry. Errors are reserved for caller
//! misuse: unknown ids and double finalization.

mod carts;
mod exchange;
mod ledger;
mod registry;

pub use exchange::Exchange;
pub use ledger::StockLevel;
