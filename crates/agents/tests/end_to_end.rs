//! Full producer/consumer round trips against one shared exchange.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bazaar_agents::{
    Batch, CartAction, CartStep, ConsumerAgent, ProducerAgent, ProductionPlan, ShoppingPlan,
};
use bazaar_core::Good;
use bazaar_exchange::Exchange;

/// Shared output buffer standing in for stdout.
#[derive(Debug, Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn wait(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn consumer_buys_what_the_producer_publishes() {
    let exchange = Arc::new(Exchange::new(5).unwrap());
    let out = SharedBuf::default();

    let producer = ProducerAgent::spawn(
        exchange.clone(),
        ProductionPlan {
            batches: vec![
                Batch {
                    good: Good::from("tea"),
                    quantity: 2,
                    pace: Duration::ZERO,
                },
                Batch {
                    good: Good::from("coffee"),
                    quantity: 1,
                    pace: Duration::ZERO,
                },
            ],
            republish_wait: wait(1),
        },
    );

    let consumer = ConsumerAgent::spawn(
        exchange.clone(),
        "alice".to_string(),
        ShoppingPlan {
            carts: vec![
                vec![CartStep {
                    action: CartAction::Add,
                    good: Good::from("tea"),
                    quantity: 2,
                }],
                vec![
                    CartStep {
                        action: CartAction::Add,
                        good: Good::from("coffee"),
                        quantity: 1,
                    },
                    CartStep {
                        action: CartAction::Add,
                        good: Good::from("tea"),
                        quantity: 1,
                    },
                    CartStep {
                        action: CartAction::Remove,
                        good: Good::from("tea"),
                        quantity: 1,
                    },
                ],
            ],
            retry_wait: wait(1),
        },
        out.clone(),
    );

    consumer.join();
    producer.shutdown();

    assert_eq!(
        out.contents(),
        "alice bought tea\nalice bought tea\nalice bought coffee\n"
    );
}

#[test]
fn concurrent_consumers_report_without_losing_lines() {
    let exchange = Arc::new(Exchange::new(6).unwrap());
    let out = SharedBuf::default();
    let milk = Good::from("milk");

    let producer = ProducerAgent::spawn(
        exchange.clone(),
        ProductionPlan {
            batches: vec![Batch {
                good: milk.clone(),
                quantity: 1,
                pace: Duration::ZERO,
            }],
            republish_wait: wait(1),
        },
    );

    let consumers: Vec<_> = ["bob", "carol"]
        .into_iter()
        .map(|name| {
            ConsumerAgent::spawn(
                exchange.clone(),
                name.to_string(),
                ShoppingPlan {
                    carts: vec![vec![CartStep {
                        action: CartAction::Add,
                        good: milk.clone(),
                        quantity: 3,
                    }]],
                    retry_wait: wait(1),
                },
                out.clone(),
            )
        })
        .collect();

    for consumer in consumers {
        consumer.join();
    }
    producer.shutdown();

    let contents = out.contents();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines.iter().filter(|l| **l == "bob bought milk").count(), 3);
    assert_eq!(
        lines.iter().filter(|l| **l == "carol bought milk").count(),
        3
    );
}
