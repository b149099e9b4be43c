//! Strongly-typed identifiers used across the domain.
//!
//! Producer and cart ids are assigned by the exchange from a monotonically
//! increasing counter per id-space, starting at 0. They are never reused.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;

/// Identifier of a registered producer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProducerId(u64);

/// Identifier of a consumer cart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(u64);

macro_rules! impl_sequence_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw sequence number.
            ///
            /// Ids are normally handed out by the exchange; constructing one
            /// directly is useful in tests and when replaying event records.
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = ExchangeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = u64::from_str(s)
                    .map_err(|e| ExchangeError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_sequence_newtype!(ProducerId, "ProducerId");
impl_sequence_newtype!(CartId, "CartId");
