//! Operation event records and the sink they are appended to.
//!
//! The exchange emits one timestamped record per operation. Where the record
//! goes (a log file, a test buffer, nowhere) is the embedder's choice; the
//! exchange only knows the [`EventSink`] contract.

pub mod record;
pub mod sink;

pub use record::{EventRecord, ExchangeEvent};
pub use sink::{EventSink, InMemoryEventSink, Subscription};
