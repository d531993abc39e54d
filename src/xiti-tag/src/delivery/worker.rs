use super::{DeliveryReceiver, Operation, Transport};
use crate::constants::WORKER_THREAD_NAME;
use crate::error::TagError;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Stopped,
}

/// What the worker did before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub delivered: usize,
    pub failed: usize,
}

impl WorkerReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Consumer side of the delivery queue.
pub struct DeliveryWorker {
    receiver: DeliveryReceiver,
    transport: Arc<dyn Transport>,
}

impl DeliveryWorker {
    pub fn new(receiver: DeliveryReceiver, transport: Arc<dyn Transport>) -> Self {
        Self {
            receiver,
            transport,
        }
    }

    /// Starts the worker on its own thread with a single-threaded runtime,
    /// independent of whatever runtime the caller may be running in.
    pub fn spawn(self) -> Result<WorkerHandle, TagError> {
        let thread = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || self.run_blocking())
            .map_err(TagError::WorkerSpawn)?;

        Ok(WorkerHandle { thread })
    }

    fn run_blocking(self) -> WorkerReport {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.run()),
            Err(e) => {
                error!("Failed to build the delivery runtime: {}", e);
                WorkerReport::default()
            }
        }
    }

    /// Processes operations one at a time until `Shutdown` is dequeued or
    /// every producer is gone.
    pub async fn run(mut self) -> WorkerReport {
        let mut report = WorkerReport::default();
        info!("Delivery worker started");

        loop {
            match self.receiver.dequeue().await {
                Some(Operation::Deliver { url }) => {
                    if self.deliver(&url).await {
                        report.delivered += 1;
                    } else {
                        report.failed += 1;
                    }
                }
                Some(Operation::Shutdown) => {
                    info!("Delivery worker received shutdown signal");
                    break;
                }
                None => {
                    debug!("Delivery queue closed, stopping worker");
                    break;
                }
            }
        }

        info!(
            delivered = report.delivered,
            failed = report.failed,
            "Delivery worker stopped"
        );
        report
    }

    /// Sends one hit. Errors and panics from the transport end here.
    async fn deliver(&self, url: &str) -> bool {
        match AssertUnwindSafe(self.transport.get(url)).catch_unwind().await {
            Ok(Ok(())) => {
                debug!("Hit delivered: {}", url);
                true
            }
            Ok(Err(e)) => {
                debug!("Hit delivery to {} failed: {:?}", url, e);
                false
            }
            Err(_) => {
                error!("Transport panicked while delivering {}", url);
                false
            }
        }
    }
}

/// Owns the worker thread.
#[derive(Debug)]
pub struct WorkerHandle {
    thread: JoinHandle<WorkerReport>,
}

impl WorkerHandle {
    pub fn state(&self) -> WorkerState {
        if self.thread.is_finished() {
            WorkerState::Stopped
        } else {
            WorkerState::Running
        }
    }

    /// Blocks until the worker has stopped. `None` if the thread panicked.
    pub fn join(self) -> Option<WorkerReport> {
        match self.thread.join() {
            Ok(report) => Some(report),
            Err(_) => {
                error!("Delivery worker thread panicked");
                None
            }
        }
    }
}
