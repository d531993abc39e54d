use crate::delivery::Transport;
use crate::tag::Clock;
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// Records every URL it is asked to fetch.
#[derive(Default)]
pub struct RecordingTransport {
    urls: Mutex<Vec<String>>,
    fail_on: Option<String>,
    panic_on: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests whose URL contains `pattern` fail after being recorded.
    pub fn failing_on(mut self, pattern: &str) -> Self {
        self.fail_on = Some(pattern.to_string());
        self
    }

    /// Requests whose URL contains `pattern` panic after being recorded.
    pub fn panicking_on(mut self, pattern: &str) -> Self {
        self.panic_on = Some(pattern.to_string());
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &str) -> anyhow::Result<()> {
        self.urls.lock().unwrap().push(url.to_string());

        if self.panic_on.as_deref().is_some_and(|p| url.contains(p)) {
            panic!("transport panic for {url}");
        }
        if self.fail_on.as_deref().is_some_and(|p| url.contains(p)) {
            return Err(anyhow!("simulated failure for {url}"));
        }
        Ok(())
    }
}

/// Clock returning a fixed value, optionally advancing on every read.
pub struct FixedClock {
    now: AtomicI64,
    step: i64,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
            step: 0,
        }
    }

    pub fn ticking(now: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
            step,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}
