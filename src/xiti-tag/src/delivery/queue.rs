use super::Operation;
use tokio::sync::mpsc;
use tracing::debug;

/// Creates a connected queue: any number of [`DeliveryQueue`] clones on the
/// producer side and exactly one [`DeliveryReceiver`].
pub fn delivery_queue() -> (DeliveryQueue, DeliveryReceiver) {
    let (tx, rx) = mpsc::unbounded_channel::<Operation>();
    (DeliveryQueue { tx }, DeliveryReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct DeliveryQueue {
    tx: mpsc::UnboundedSender<Operation>,
}

impl DeliveryQueue {
    /// Never blocks. Once the worker has stopped the operation is dropped.
    pub fn enqueue(&self, operation: Operation) {
        if let Err(mpsc::error::SendError(operation)) = self.tx.send(operation) {
            debug!("Delivery worker stopped, dropping {:?}", operation);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct DeliveryReceiver {
    rx: mpsc::UnboundedReceiver<Operation>,
}

impl DeliveryReceiver {
    /// Waits for the next operation. `None` once every producer is gone and
    /// the queue is drained.
    pub async fn dequeue(&mut self) -> Option<Operation> {
        self.rx.recv().await
    }
}
