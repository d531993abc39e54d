use thiserror::Error;

/// Errors surfaced to application code.
///
/// Delivery failures are not part of this type: they stay inside the
/// background worker and only show up in the logs.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("Xiti tag must be initialized before use.")]
    Uninitialized,

    #[error("the page or action name must not be empty")]
    EmptyName,

    #[error("failed to build the HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to start the delivery worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}
