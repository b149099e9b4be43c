//! Consumer work loop.

use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::warn;

use bazaar_core::Good;
use bazaar_exchange::Exchange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Remove,
}

/// One instruction inside a planned cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStep {
    pub action: CartAction,
    pub good: Good,
    pub quantity: u32,
}

/// The carts a consumer works through, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingPlan {
    pub carts: Vec<Vec<CartStep>>,
    /// Sleep between reserve attempts while stock is missing.
    pub retry_wait: Duration,
}

/// Handle to join a running consumer.
///
/// Unlike producers, consumers stop on their own once their plan is
/// exhausted; there is nothing to shut down.
#[derive(Debug)]
pub struct ConsumerHandle {
    join: Option<thread::JoinHandle<()>>,
}

impl ConsumerHandle {
    /// Wait for the consumer to finish its plan.
    pub fn join(mut self) {
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// A consumer: fills carts per its plan, finalizes each into an order, and
/// reports every bought item on `out` under the exchange's report lock.
#[derive(Debug)]
pub struct ConsumerAgent;

impl ConsumerAgent {
    pub fn spawn<W>(
        exchange: Arc<Exchange>,
        name: String,
        plan: ShoppingPlan,
        mut out: W,
    ) -> ConsumerHandle
    where
        W: Write + Send + 'static,
    {
        let join = thread::Builder::new()
            .name(format!("consumer-{name}"))
            .spawn(move || run(&exchange, &name, &plan, &mut out))
            .expect("failed to spawn consumer thread");

        ConsumerHandle { join: Some(join) }
    }
}

fn run<W: Write>(exchange: &Exchange, name: &str, plan: &ShoppingPlan, out: &mut W) {
    for steps in &plan.carts {
        let cart = exchange.new_cart();

        for step in steps {
            match step.action {
                CartAction::Add => {
                    for _ in 0..step.quantity {
                        loop {
                            match exchange.reserve(cart, &step.good) {
                                Ok(true) => break,
                                Ok(false) => thread::sleep(plan.retry_wait),
                                Err(err) => {
                                    warn!(consumer = name, error = %err, "reserve failed, stopping agent");
                                    return;
                                }
                            }
                        }
                    }
                }
                CartAction::Remove => {
                    for _ in 0..step.quantity {
                        if let Err(err) = exchange.unreserve(cart, &step.good) {
                            warn!(consumer = name, error = %err, "unreserve failed, stopping agent");
                            return;
                        }
                    }
                }
            }
        }

        let order = match exchange.place_order(cart) {
            Ok(order) => order,
            Err(err) => {
                warn!(consumer = name, error = %err, "order failed, stopping agent");
                return;
            }
        };

        for line in &order {
            let _guard = exchange.order_report_lock();
            if let Err(err) = writeln!(out, "{name} bought {}", line.good) {
                warn!(consumer = name, error = %err, "order report failed, stopping agent");
                return;
            }
        }
    }
}
