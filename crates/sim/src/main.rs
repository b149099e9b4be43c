mod config;

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::bail;

use bazaar_agents::{ConsumerAgent, ProducerAgent};
use bazaar_exchange::Exchange;

use crate::config::Scenario;

fn main() -> anyhow::Result<()> {
    bazaar_observability::init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: bazaar-sim <scenario.json>");
    };
    let scenario = Scenario::from_file(Path::new(&path))?;

    let exchange = Arc::new(Exchange::new(scenario.queue_size_per_producer)?);
    tracing::info!(
        producers = scenario.producers.len(),
        consumers = scenario.consumers.len(),
        quota = scenario.queue_size_per_producer,
        "starting simulation"
    );

    let producers: Vec<_> = scenario
        .producers
        .into_iter()
        .map(|spec| ProducerAgent::spawn(exchange.clone(), spec.into_plan()))
        .collect();

    let consumers: Vec<_> = scenario
        .consumers
        .into_iter()
        .map(|spec| {
            let (name, plan) = spec.into_parts();
            ConsumerAgent::spawn(exchange.clone(), name, plan, io::stdout())
        })
        .collect();

    // Consumers finish on their own; producers publish until told to stop.
    for consumer in consumers {
        consumer.join();
    }
    for producer in producers {
        producer.shutdown();
    }

    tracing::info!("simulation complete");
    Ok(())
}
