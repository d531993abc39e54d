//! Process-wide tagging client.
//!
//! The first successful [`init`] wins: later calls return the existing
//! client without touching its configuration or starting another worker.
//! Calling [`init`] again after [`terminate`] hands back the terminated
//! client, whose hits are dropped.

use super::XitiTag;
use crate::config::Config;
use crate::error::TagError;
use crate::tag::ActionType;
use once_cell::sync::OnceCell;
use tracing::debug;

/// Initialize-once holder for an [`XitiTag`].
pub struct TagRegistry {
    instance: OnceCell<XitiTag>,
}

impl TagRegistry {
    pub const fn new() -> Self {
        Self {
            instance: OnceCell::new(),
        }
    }

    pub fn init(&self, config: Config) -> Result<&XitiTag, TagError> {
        self.init_with(|| XitiTag::init(config))
    }

    /// Like [`TagRegistry::init`], with the client built by `make`. `make`
    /// is not called when a client already exists.
    pub fn init_with<F>(&self, make: F) -> Result<&XitiTag, TagError>
    where
        F: FnOnce() -> Result<XitiTag, TagError>,
    {
        if let Some(tag) = self.instance.get() {
            debug!("XitiTag already initialized, keeping the existing client");
            return Ok(tag);
        }
        self.instance.get_or_try_init(make)
    }

    pub fn get(&self) -> Result<&XitiTag, TagError> {
        self.instance.get().ok_or(TagError::Uninitialized)
    }

    pub fn tag_page(&self, page: &str, subsite_id: Option<&str>) -> Result<(), TagError> {
        self.get()?.tag_page(page, subsite_id)
    }

    pub fn tag_action(
        &self,
        action: &str,
        action_type: ActionType,
        subsite_id: Option<&str>,
    ) -> Result<(), TagError> {
        self.get()?.tag_action(action, action_type, subsite_id)
    }

    pub fn terminate(&self) -> Result<(), TagError> {
        self.get()?.terminate();
        Ok(())
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: TagRegistry = TagRegistry::new();

pub fn init(config: Config) -> Result<&'static XitiTag, TagError> {
    GLOBAL.init(config)
}

pub fn init_with<F>(make: F) -> Result<&'static XitiTag, TagError>
where
    F: FnOnce() -> Result<XitiTag, TagError>,
{
    GLOBAL.init_with(make)
}

pub fn instance() -> Option<&'static XitiTag> {
    GLOBAL.get().ok()
}

pub fn tag_page(page: &str, subsite_id: Option<&str>) -> Result<(), TagError> {
    GLOBAL.tag_page(page, subsite_id)
}

pub fn tag_action(
    action: &str,
    action_type: ActionType,
    subsite_id: Option<&str>,
) -> Result<(), TagError> {
    GLOBAL.tag_action(action, action_type, subsite_id)
}

pub fn terminate() -> Result<(), TagError> {
    GLOBAL.terminate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::StaticMetadataProvider;
    use crate::test_utils::{FixedClock, RecordingTransport};
    use std::sync::Arc;

    fn make(config: Config, transport: Arc<RecordingTransport>) -> Result<XitiTag, TagError> {
        XitiTag::with_parts(
            config,
            &StaticMetadataProvider::default(),
            transport,
            Arc::new(FixedClock::new(0)),
        )
    }

    #[test]
    fn test_calls_before_init_are_rejected() {
        let registry = TagRegistry::new();
        assert!(matches!(
            registry.tag_page("x", None),
            Err(TagError::Uninitialized)
        ));
        assert!(matches!(
            registry.tag_action("x", ActionType::Exit, None),
            Err(TagError::Uninitialized)
        ));
        assert!(matches!(registry.terminate(), Err(TagError::Uninitialized)));
    }

    #[test]
    fn test_second_init_keeps_the_first_config() {
        let registry = TagRegistry::new();
        let transport = Arc::new(RecordingTransport::new());

        let first = registry
            .init_with(|| make(Config::new("first", "1"), transport.clone()))
            .unwrap();
        let second = registry
            .init_with(|| make(Config::new("second", "2"), transport.clone()))
            .unwrap();

        assert!(std::ptr::eq(first, second));
        assert_eq!(second.config().subdomain, "first");

        registry.tag_page("Home", None).unwrap();
        registry.terminate().unwrap();
        registry.get().unwrap().join().unwrap();

        let urls = transport.urls();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("http://first.xiti.com/hit.xiti?s=1&"));
    }

    #[test]
    fn test_second_init_does_not_build_a_client() {
        let registry = TagRegistry::new();
        let transport = Arc::new(RecordingTransport::new());
        registry
            .init_with(|| make(Config::new("first", "1"), transport))
            .unwrap();

        let mut called = false;
        registry
            .init_with(|| {
                called = true;
                Err(TagError::Uninitialized)
            })
            .unwrap();
        assert!(!called);

        registry.terminate().unwrap();
    }
}
