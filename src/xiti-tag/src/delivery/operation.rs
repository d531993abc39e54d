/// Unit of work for the delivery worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Deliver { url: String },
    /// Stops the worker; anything queued after it is never processed.
    Shutdown,
}

impl Operation {
    pub fn deliver(url: impl Into<String>) -> Self {
        Operation::Deliver { url: url.into() }
    }
}
