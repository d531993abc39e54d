//! Device and application attributes sent with every hit.

mod device_info;
mod system;

pub use device_info::DeviceInfo;
pub use system::SystemMetadataProvider;

use serde::Serialize;
use std::collections::BTreeMap;

pub const LOCALE_KEY: &str = "lng";
pub const MODEL_KEY: &str = "mdl";
pub const OS_KEY: &str = "os";
pub const CONNECTION_KEY: &str = "tc";
pub const APP_VERSION_KEY: &str = "apvr";
pub const CLIENT_ID_KEY: &str = "idclient";

/// Wire parameter name to value, captured once when the client starts.
///
/// Keys are kept sorted so URLs are built in a stable order. A field that
/// could not be determined has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataSnapshot(BTreeMap<String, String>);

impl MetadataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, ignoring empty values.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(key.into(), value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MetadataSnapshot::new(), |snapshot, (k, v)| snapshot.with(k, v))
    }
}

pub trait MetadataProvider: Send + Sync {
    fn snapshot(&self) -> MetadataSnapshot;
}

/// Provider returning a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataProvider(MetadataSnapshot);

impl StaticMetadataProvider {
    pub fn new(snapshot: MetadataSnapshot) -> Self {
        Self(snapshot)
    }
}

impl MetadataProvider for StaticMetadataProvider {
    fn snapshot(&self) -> MetadataSnapshot {
        self.0.clone()
    }
}
