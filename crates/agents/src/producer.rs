//! Producer work loop.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use bazaar_core::{Good, ProducerId};
use bazaar_exchange::Exchange;

/// One production batch: `quantity` units of `good`, pausing `pace` after
/// each accepted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub good: Good,
    pub quantity: u32,
    pub pace: Duration,
}

/// What a producer publishes and how it backs off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionPlan {
    /// Worked through in order, then cycled from the start, indefinitely.
    pub batches: Vec<Batch>,
    /// Sleep between publish attempts while the quota is exhausted.
    pub republish_wait: Duration,
}

/// Handle to control and join a running producer.
#[derive(Debug)]
pub struct ProducerHandle {
    producer: ProducerId,
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl ProducerHandle {
    /// The id this agent registered under.
    pub fn producer(&self) -> ProducerId {
        self.producer
    }

    /// Request graceful shutdown and wait for the thread to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// A producer: registers once, then publishes its plan forever.
#[derive(Debug)]
pub struct ProducerAgent;

impl ProducerAgent {
    /// Register a producer and spawn its publishing thread.
    pub fn spawn(exchange: Arc<Exchange>, plan: ProductionPlan) -> ProducerHandle {
        let producer = exchange.register_producer();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let join = thread::Builder::new()
            .name(format!("producer-{producer}"))
            .spawn(move || run(&exchange, producer, &plan, &shutdown_rx))
            .expect("failed to spawn producer thread");

        ProducerHandle {
            producer,
            shutdown: shutdown_tx,
            join: Some(join),
        }
    }
}

fn run(
    exchange: &Exchange,
    producer: ProducerId,
    plan: &ProductionPlan,
    shutdown_rx: &mpsc::Receiver<()>,
) {
    if plan.batches.is_empty() {
        debug!(producer = %producer, "empty production plan, nothing to publish");
        return;
    }

    'agent: loop {
        for batch in &plan.batches {
            for _ in 0..batch.quantity {
                loop {
                    // Shutdown check (non-blocking)
                    if shutdown_rx.try_recv().is_ok() {
                        break 'agent;
                    }

                    match exchange.publish(producer, &batch.good) {
                        Ok(true) => {
                            thread::sleep(batch.pace);
                            break;
                        }
                        Ok(false) => thread::sleep(plan.republish_wait),
                        Err(err) => {
                            warn!(producer = %producer, error = %err, "publish failed, stopping agent");
                            break 'agent;
                        }
                    }
                }
            }
        }
    }
}
