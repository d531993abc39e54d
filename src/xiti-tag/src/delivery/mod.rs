//! Serialized delivery of hits.
//!
//! Producers push [`Operation`]s into an unbounded FIFO queue; a single
//! worker thread pops them one at a time and sends each hit with a
//! [`Transport`]. The queue is the only point shared between the two sides
//! and nothing that goes wrong in the worker travels back through it.

mod operation;
mod queue;
mod transport;
mod worker;

pub use operation::Operation;
pub use queue::{delivery_queue, DeliveryQueue, DeliveryReceiver};
pub use transport::{ReqwestTransport, Transport};
pub use worker::{DeliveryWorker, WorkerHandle, WorkerReport, WorkerState};

#[cfg(test)]
pub use transport::MockTransport;
