//! Domain error model.

use thiserror::Error;

use crate::id::{CartId, ProducerId};

/// Result type used across the exchange.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Exchange-level error.
///
/// Contention (quota exhausted, no stock) is *not* an error: operations
/// signal it with `Ok(false)` and the caller backs off. Errors are reserved
/// for caller misuse and invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// A configuration value failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was malformed (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// `publish` referenced a producer id that was never registered.
    #[error("unknown producer id: {0}")]
    UnknownProducer(ProducerId),

    /// A cart operation referenced a cart id that was never created.
    #[error("unknown cart id: {0}")]
    UnknownCart(CartId),

    /// `place_order` was called again on an already-finalized cart.
    #[error("cart {0} is already finalized")]
    CartFinalized(CartId),
}

impl ExchangeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
