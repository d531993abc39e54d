use crate::config::Config;
use crate::delivery::{
    delivery_queue, DeliveryQueue, DeliveryWorker, Operation, ReqwestTransport, Transport,
    WorkerHandle, WorkerReport, WorkerState,
};
use crate::error::TagError;
use crate::metadata::{MetadataProvider, MetadataSnapshot, SystemMetadataProvider};
use crate::tag::{ActionType, Clock, EventPayload, SystemClock, UrlBuilder};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Tagging client.
///
/// Owns the metadata snapshot taken at start-up, the producer side of the
/// delivery queue and the one worker consuming it. Tagging calls only build
/// a URL and enqueue it; they never wait on the network.
pub struct XitiTag {
    config: Config,
    metadata: MetadataSnapshot,
    url_builder: UrlBuilder,
    queue: DeliveryQueue,
    clock: Arc<dyn Clock>,
    worker: Mutex<Option<WorkerHandle>>,
}

impl XitiTag {
    /// Collects the host metadata, builds the HTTP transport and starts the
    /// delivery worker.
    pub fn init(config: Config) -> Result<Self, TagError> {
        let provider = SystemMetadataProvider::from_config(&config);
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Self::with_parts(config, &provider, transport, Arc::new(SystemClock))
    }

    pub fn with_parts(
        config: Config,
        provider: &dyn MetadataProvider,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TagError> {
        info!(
            "Initializing XitiTag for {} (site {})",
            config.subdomain, config.site_id
        );

        let metadata = provider.snapshot();
        debug!("Collected {} metadata fields", metadata.len());

        let url_builder = UrlBuilder::from_config(&config, &metadata);
        let (queue, receiver) = delivery_queue();
        let worker = DeliveryWorker::new(receiver, transport).spawn()?;

        Ok(Self {
            config,
            metadata,
            url_builder,
            queue,
            clock,
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Tags a page view. `subsite_id` replaces the configured subsite for
    /// this hit only.
    pub fn tag_page(&self, page: &str, subsite_id: Option<&str>) -> Result<(), TagError> {
        let payload = EventPayload::page(page)?;
        self.launch_request(&payload, subsite_id);
        Ok(())
    }

    pub fn tag_action(
        &self,
        action: &str,
        action_type: ActionType,
        subsite_id: Option<&str>,
    ) -> Result<(), TagError> {
        let payload = EventPayload::action(action, action_type)?;
        self.launch_request(&payload, subsite_id);
        Ok(())
    }

    /// Asks the worker to stop once everything queued so far is sent.
    /// Returns immediately; use [`XitiTag::join`] to wait.
    pub fn terminate(&self) {
        info!("Terminating XitiTag");
        self.queue.enqueue(Operation::Shutdown);
    }

    /// Waits for the worker to stop. Only the first call gets the report.
    pub fn join(&self) -> Option<WorkerReport> {
        let handle = self.lock_worker().take()?;
        handle.join()
    }

    pub fn worker_state(&self) -> WorkerState {
        match self.lock_worker().as_ref() {
            Some(handle) => handle.state(),
            None => WorkerState::Stopped,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn metadata(&self) -> &MetadataSnapshot {
        &self.metadata
    }

    fn launch_request(&self, payload: &EventPayload, subsite_id: Option<&str>) {
        let url = self
            .url_builder
            .build(payload, subsite_id, self.clock.now_millis());
        debug!("XitiTag built url {}", url);
        self.queue.enqueue(Operation::Deliver { url });
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<WorkerHandle>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
