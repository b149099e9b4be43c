//! Scenario configuration: the wire format of a simulation run.
//!
//! These DTOs mirror the JSON scenario file; they convert into the agent
//! crate's plan types rather than being used directly.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use bazaar_agents::{Batch, CartAction, CartStep, ProductionPlan, ShoppingPlan};
use bazaar_core::Good;

/// Top-level scenario file.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Quota applied to every producer registered on the exchange.
    pub queue_size_per_producer: u32,
    pub producers: Vec<ProducerSpec>,
    pub consumers: Vec<ConsumerSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProducerSpec {
    pub republish_wait_ms: u64,
    pub batches: Vec<BatchSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSpec {
    pub product: String,
    pub quantity: u32,
    pub pace_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConsumerSpec {
    pub name: String,
    pub retry_wait_ms: u64,
    pub carts: Vec<Vec<StepSpec>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepSpec {
    #[serde(rename = "type")]
    pub action: ActionSpec,
    pub product: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSpec {
    Add,
    Remove,
}

impl Scenario {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse scenario file {}", path.display()))
    }
}

impl ProducerSpec {
    pub fn into_plan(self) -> ProductionPlan {
        ProductionPlan {
            batches: self
                .batches
                .into_iter()
                .map(|b| Batch {
                    good: Good::from(b.product),
                    quantity: b.quantity,
                    pace: Duration::from_millis(b.pace_ms),
                })
                .collect(),
            republish_wait: Duration::from_millis(self.republish_wait_ms),
        }
    }
}

impl ConsumerSpec {
    pub fn into_parts(self) -> (String, ShoppingPlan) {
        let plan = ShoppingPlan {
            carts: self
                .carts
                .into_iter()
                .map(|steps| {
                    steps
                        .into_iter()
                        .map(|s| CartStep {
                            action: match s.action {
                                ActionSpec::Add => CartAction::Add,
                                ActionSpec::Remove => CartAction::Remove,
                            },
                            good: Good::from(s.product),
                            quantity: s.quantity,
                        })
                        .collect()
                })
                .collect(),
            retry_wait: Duration::from_millis(self.retry_wait_ms),
        };
        (self.name, plan)
    }
}
