//! Event sink abstraction (mechanics only).
//!
//! A sink receives the exchange's operation records. The contract is
//! deliberately small:
//!
//! - **Best-effort**: `append` never fails the operation that produced the
//!   record. A sink that cannot keep a record drops it.
//! - **Append-only**: sinks receive records in the order each publisher
//!   appends them; ordering between concurrent publishers is whatever the
//!   sink observes.
//! - **No storage assumptions**: the in-memory sink here fans out to
//!   subscribers; a file or network sink is the embedder's business.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use parking_lot::Mutex;

use crate::record::EventRecord;

/// Destination for operation event records.
pub trait EventSink: Send + Sync {
    fn append(&self, record: EventRecord);
}

/// A subscription to an in-memory sink.
///
/// Each subscription gets a copy of every record appended after it was
/// created. Intended for single-threaded consumption: one subscription per
/// consumer thread.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<EventRecord>,
}

impl Subscription {
    /// Block until the next record is available.
    pub fn recv(&self) -> Result<EventRecord, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a record without blocking.
    pub fn try_recv(&self) -> Result<EventRecord, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a record.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EventRecord, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every record currently buffered, without blocking.
    pub fn drain(&self) -> Vec<EventRecord> {
        let mut out = Vec::new();
        while let Ok(record) = self.receiver.try_recv() {
            out.push(record);
        }
        out
    }
}

/// In-memory fan-out sink.
///
/// Every subscriber gets a copy of every appended record. Subscribers whose
/// receiving end has been dropped are pruned on the next append.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    subscribers: Mutex<Vec<mpsc::Sender<EventRecord>>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.lock().push(tx);
        Subscription { receiver: rx }
    }
}

impl EventSink for InMemoryEventSink {
    fn append(&self, record: EventRecord) {
        let mut subs = self.subscribers.lock();
        subs.retain(|tx| tx.send(record.clone()).is_ok());
    }
}
